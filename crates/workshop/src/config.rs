use std::{env, time::Duration};

use chrono::NaiveTime;
use workshop_core::schedule::{default_max_time, default_min_time, Granularity};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Whether to load the demo dataset on startup (default: true)
    pub seed_demo_data: bool,
    /// First visible hour of schedule views (default: 07:00)
    pub day_start: NaiveTime,
    /// Last visible hour of schedule views (default: 19:00)
    pub day_end: NaiveTime,
    /// Granularity used when a schedule request names none (default: week)
    pub default_granularity: Granularity,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    /// - `SEED_DEMO_DATA` - Load demo data on startup (default: true)
    /// - `DAY_START` - First visible hour, `HH:MM` (default: 07:00)
    /// - `DAY_END` - Last visible hour, `HH:MM` (default: 19:00)
    /// - `DEFAULT_GRANULARITY` - `day`, `week` or `month` (default: week)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparseable values fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let time = |key: &str, default: NaiveTime| {
            lookup(key)
                .and_then(|v| NaiveTime::parse_from_str(v.trim(), "%H:%M").ok())
                .unwrap_or(default)
        };

        let config = Self {
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.seed_demo_data),
            day_start: time("DAY_START", defaults.day_start),
            day_end: time("DAY_END", defaults.day_end),
            default_granularity: lookup("DEFAULT_GRANULARITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_granularity),
        };

        if config.day_start >= config.day_end {
            tracing::warn!(
                day_start = %config.day_start,
                day_end = %config.day_end,
                "DAY_START must be before DAY_END, using default working hours"
            );
            return Self {
                day_start: defaults.day_start,
                day_end: defaults.day_end,
                ..config
            };
        }
        config
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            seed_demo_data: true,
            day_start: default_min_time(),
            day_end: default_max_time(),
            default_granularity: Granularity::Week,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config {
            request_timeout_seconds: 30,
            ..Config::default()
        };

        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config.request_timeout_seconds, 10);
        assert!(config.seed_demo_data);
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(7, 0, 0).unwrap());
        assert_eq!(config.day_end, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(config.default_granularity, Granularity::Week);
    }

    #[test]
    fn test_values_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            ("REQUEST_TIMEOUT_SECONDS", "5"),
            ("SEED_DEMO_DATA", "false"),
            ("DAY_START", "08:30"),
            ("DAY_END", "17:00"),
            ("DEFAULT_GRANULARITY", "month"),
        ]));

        assert_eq!(config.request_timeout_seconds, 5);
        assert!(!config.seed_demo_data);
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert_eq!(config.day_end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(config.default_granularity, Granularity::Month);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("REQUEST_TIMEOUT_SECONDS", "soon"),
            ("DAY_START", "20:00"),
            ("DAY_END", "06:00"),
            ("DEFAULT_GRANULARITY", "year"),
        ]));

        assert_eq!(config.request_timeout_seconds, 10);
        assert_eq!(config.day_start, default_min_time());
        assert_eq!(config.day_end, default_max_time());
        assert_eq!(config.default_granularity, Granularity::Week);
    }
}

//! Serde helper functions for query-string and form deserialization.
//!
//! Query parameters arrive as strings; empty values are treated as None for
//! optional fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Parses an instant as RFC 3339, or as a naive `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Expects format: YYYY-MM-DD
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional Uuid, treating empty strings as None.
pub fn deserialize_optional_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => Uuid::parse_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional instant, treating empty strings as None.
/// Accepts RFC 3339 or a naive date-time interpreted as UTC.
pub fn deserialize_optional_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_instant(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid instant: {s}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Test struct that uses the deserializer functions
    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        date_field: Option<NaiveDate>,
        #[serde(default, deserialize_with = "deserialize_optional_uuid")]
        uuid_field: Option<Uuid>,
        #[serde(default, deserialize_with = "deserialize_optional_instant")]
        instant_field: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let json = r#"{"string_field": "brakes"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, Some("brakes".to_string()));
    }

    #[test]
    fn test_missing_fields_are_none() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(
            result,
            TestStruct {
                string_field: None,
                date_field: None,
                uuid_field: None,
                instant_field: None,
            }
        );
    }

    #[test]
    fn test_deserialize_optional_date_valid() {
        let json = r#"{"date_field": "2025-01-15"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.date_field,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_deserialize_optional_date_invalid() {
        let json = r#"{"date_field": "not-a-date"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_optional_uuid() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"uuid_field": "{id}"}}"#);
        let result: TestStruct = serde_json::from_str(&json).unwrap();
        assert_eq!(result.uuid_field, Some(id));

        let result: TestStruct = serde_json::from_str(r#"{"uuid_field": ""}"#).unwrap();
        assert_eq!(result.uuid_field, None);

        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"uuid_field": "nope"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_optional_instant() {
        let json = r#"{"instant_field": "2025-01-15T09:00:00+02:00"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.instant_field,
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 7, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_instant_naive_is_utc() {
        assert_eq!(
            parse_instant("2025-01-15T09:30"),
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap())
        );
        assert_eq!(
            parse_instant("2025-01-15 09:30"),
            Some(Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap())
        );
        assert_eq!(parse_instant("tomorrow"), None);
    }
}

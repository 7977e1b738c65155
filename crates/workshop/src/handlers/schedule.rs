//! Role-scoped schedule view (GET /api/schedule).

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use workshop_core::schedule::{Granularity, ScheduleFilter, ScheduleView, ViewWindow};
use workshop_core::serde::{
    deserialize_optional_date, deserialize_optional_string, deserialize_optional_uuid,
};

use crate::{config::Config, context::RequestContext, state::AppState};

/// Query parameters for the schedule view.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// `day`, `week` or `month` (default from configuration)
    #[serde(default)]
    pub granularity: Option<Granularity>,
    /// Any date inside the window, YYYY-MM-DD (default: today)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    /// Free-text search box contents
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub to: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub client_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub mechanic_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub service_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub car_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub query: Option<String>,
}

impl ScheduleQuery {
    fn filter(&self) -> ScheduleFilter {
        ScheduleFilter {
            from: self.from,
            to: self.to,
            client_id: self.client_id,
            mechanic_id: self.mechanic_id,
            service_id: self.service_id,
            car_id: self.car_id,
            status: self.status.clone(),
            query: self.query.clone(),
        }
    }

    fn window(&self, config: &Config) -> ViewWindow {
        let granularity = self.granularity.unwrap_or(config.default_granularity);
        let anchor = self.date.unwrap_or_else(|| Utc::now().date_naive());
        ViewWindow::new(granularity, anchor).with_hours(config.day_start, config.day_end)
    }
}

/// Load the schedule visible to the caller.
///
/// A failed fetch of one booking kind still returns 200 with that kind listed
/// in `failed`.
pub async fn get_schedule(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<ScheduleQuery>,
) -> Json<ScheduleView> {
    let view = state
        .coordinator
        .load_view(
            &ctx.identity,
            &query.filter(),
            query.search.as_deref().unwrap_or_default(),
            query.window(&state.config),
        )
        .await;

    tracing::debug!(
        request_id = %ctx.request_id,
        generation = view.generation,
        events = view.events.len(),
        "Served schedule view"
    );

    Json(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_uses_config_defaults() {
        let config = Config {
            default_granularity: Granularity::Day,
            ..Config::default()
        };
        let query = ScheduleQuery {
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..ScheduleQuery::default()
        };

        let window = query.window(&config);

        assert_eq!(window.granularity, Granularity::Day);
        assert_eq!(window.anchor, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(window.min_time, config.day_start);
    }

    #[test]
    fn test_filter_copies_every_dimension() {
        let query = ScheduleQuery {
            status: Some("confirmed".to_string()),
            query: Some("golf".to_string()),
            client_id: Some(Uuid::nil()),
            ..ScheduleQuery::default()
        };

        let filter = query.filter();

        assert_eq!(filter.status.as_deref(), Some("confirmed"));
        assert_eq!(filter.query.as_deref(), Some("golf"));
        assert_eq!(filter.client_id, Some(Uuid::nil()));
    }
}

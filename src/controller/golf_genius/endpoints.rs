use crate::config::AuditConfig;
use crate::controller::golf_genius::client::QueryParams;

pub const SEASONS_PATH: &str = "seasons";
pub const EVENTS_PATH: &str = "events";
pub const SCORECARD_URL_PREFIX: &str = "https://www.golfgenius.com/leagues";

/// Names a list resource's items go by, e.g. `event` / `events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListShape {
    pub singular: &'static str,
    pub plural: &'static str,
}

pub const SEASON_LIST: ListShape = ListShape {
    singular: "season",
    plural: "seasons",
};
pub const EVENT_LIST: ListShape = ListShape {
    singular: "event",
    plural: "events",
};
pub const ROUND_LIST: ListShape = ListShape {
    singular: "round",
    plural: "rounds",
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    pub category: Option<String>,
    pub directory: Option<String>,
    pub archived: bool,
}

impl From<&AuditConfig> for EventFilters {
    fn from(config: &AuditConfig) -> Self {
        Self {
            category: config.category.clone(),
            directory: config.directory.clone(),
            archived: config.archived,
        }
    }
}

#[must_use]
pub fn events_query(season_id: &str, filters: &EventFilters) -> QueryParams {
    let mut query = QueryParams::new();
    query.insert("season".into(), season_id.to_string());
    if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
        query.insert("category".into(), category.to_string());
    }
    if let Some(directory) = filters.directory.as_deref().filter(|d| !d.is_empty()) {
        query.insert("directory".into(), directory.to_string());
    }
    if filters.archived {
        query.insert("archived".into(), "true".into());
    }
    query
}

#[must_use]
pub fn rounds_path(event_id: &str) -> String {
    format!("events/{event_id}/rounds")
}

#[must_use]
pub fn tee_sheet_path(event_id: &str, round_id: &str) -> String {
    format!("events/{event_id}/rounds/{round_id}/tee_sheet")
}

#[must_use]
pub fn tee_sheet_query() -> QueryParams {
    let mut query = QueryParams::new();
    query.insert("include_all_custom_fields".into(), "true".into());
    query
}

#[must_use]
pub fn scorecard_url(event_id: &str, round_id: &str) -> String {
    format!("{SCORECARD_URL_PREFIX}/{event_id}/rounds/{round_id}/scorecards")
}

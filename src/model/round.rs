use crate::error::AuditError;
use crate::model::date::parse_date;
use crate::model::utils::{id_from_value, string_field};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DATE_FIELDS: [&str; 4] = ["date", "round_date", "start_date", "tee_time"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub date: Option<NaiveDate>,
    /// Text of the first non-empty date field, kept for reporting rounds
    /// whose date could not be parsed.
    pub raw_date: Option<String>,
}

impl Round {
    /// # Errors
    ///
    /// Will return `Err` if the payload carries no usable `id`
    pub fn from_api_response(payload: &Value, event_id: &str) -> Result<Self, AuditError> {
        let id = payload
            .get("id")
            .and_then(id_from_value)
            .ok_or_else(|| AuditError::MalformedResponse(format!("round without id: {payload}")))?;

        let mut raw_date = None;
        let mut date = None;
        for field in DATE_FIELDS {
            let Some(text) = string_field(payload, &[field]) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            if let Some(parsed) = parse_date(&text) {
                date = Some(parsed);
                raw_date = Some(text);
                break;
            }
            raw_date.get_or_insert(text);
        }

        Ok(Self {
            id,
            event_id: event_id.to_string(),
            name: string_field(payload, &["name", "round_name"]).unwrap_or_else(|| "Round".to_string()),
            date,
            raw_date,
        })
    }

    #[must_use]
    pub fn date_display(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "No Date".to_string(),
        }
    }
}

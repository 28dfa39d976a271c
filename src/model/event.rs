use crate::error::AuditError;
use crate::model::utils::{id_from_value, string_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub season_id: String,
}

impl Event {
    /// `requested_season` is used when the payload does not say which season
    /// the event belongs to.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the payload carries no usable `id`
    pub fn from_api_response(payload: &Value, requested_season: &str) -> Result<Self, AuditError> {
        let id = payload
            .get("id")
            .and_then(id_from_value)
            .ok_or_else(|| AuditError::MalformedResponse(format!("event without id: {payload}")))?;

        let season_id = payload
            .get("season_id")
            .and_then(id_from_value)
            .or_else(|| match payload.get("season") {
                Some(season @ Value::Object(_)) => season.get("id").and_then(id_from_value),
                Some(other) => id_from_value(other),
                None => None,
            })
            .unwrap_or_else(|| requested_season.to_string());

        Ok(Self {
            id,
            name: string_field(payload, &["name"]).unwrap_or_default(),
            season_id,
        })
    }
}

use crate::error::AuditError;
use crate::model::utils::{id_from_value, string_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Season {
    pub id: String,
    pub name: String,
    pub year: String,
}

impl Season {
    /// # Errors
    ///
    /// Will return `Err` if the payload carries no usable `id`
    pub fn from_api_response(payload: &Value) -> Result<Self, AuditError> {
        let id = payload
            .get("id")
            .and_then(id_from_value)
            .ok_or_else(|| AuditError::MalformedResponse(format!("season without id: {payload}")))?;
        Ok(Self {
            id,
            name: string_field(payload, &["name"]).unwrap_or_default(),
            year: string_field(payload, &["year"]).unwrap_or_default(),
        })
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.year)
        }
    }
}

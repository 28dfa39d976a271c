use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("transient error: {0}")]
    Transient(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("config error: {0}")]
    Config(String),
}

impl AuditError {
    /// Errors after which no further call to the remote can succeed, or which
    /// the caller has to correct before a run makes sense.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Auth(_) | Self::InvalidRange { .. } | Self::InvalidDate(_) | Self::Config(_)
        )
    }

    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        // the request url embeds the api key
        let err = err.without_url();
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            return Self::Transient(err.to_string());
        }
        if err.is_decode() {
            return Self::MalformedResponse(err.to_string());
        }
        match err.status() {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                Self::Auth(err.to_string())
            }
            Some(status) if status.as_u16() == 408 || status.as_u16() == 429 => {
                Self::Transient(err.to_string())
            }
            Some(status) if status.is_server_error() => Self::Transient(err.to_string()),
            _ => Self::Request(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<toml::de::Error> for AuditError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}

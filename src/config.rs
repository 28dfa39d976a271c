use crate::error::AuditError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.golfgenius.com/api_v2";
pub const API_KEY_ENV: &str = "GOLF_GENIUS_API_KEY";
const MIN_API_KEY_LEN: usize = 10;
/// Ceiling for `retry_delay_secs` and `rate_limit_delay_secs`.
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Everything the fetcher and the collector need for one run. Built once by
/// the caller and handed down; nothing reads the environment after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_secs: f64,
    pub rate_limit_delay_secs: f64,
    pub page_size: usize,
    pub max_pages: u32,
    pub category: Option<String>,
    pub directory: Option<String>,
    pub archived: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            max_retries: 3,
            retry_delay_secs: 1.0,
            rate_limit_delay_secs: 0.5,
            page_size: 25,
            max_pages: 1000,
            category: None,
            directory: None,
            archived: false,
        }
    }
}

impl AuditConfig {
    /// # Errors
    ///
    /// Will return `Err` if the file can't be read or isn't valid TOML
    pub fn from_toml_file(path: &Path) -> Result<Self, AuditError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| AuditError::Config(format!("read config toml {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
            .map_err(|e| AuditError::Config(format!("parse config toml {}: {e}", path.display())))
    }

    /// # Errors
    ///
    /// Will return `Err` if the text isn't valid TOML for this struct
    pub fn from_toml_str(contents: &str) -> Result<Self, AuditError> {
        Ok(toml::from_str::<Self>(contents)?)
    }

    /// Fills in the api key from `GOLF_GENIUS_API_KEY` when none was configured.
    #[must_use]
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.api_key = key;
            }
        }
        self
    }

    /// # Errors
    ///
    /// Will return `Err` if the api key is missing or malformed, or a numeric
    /// setting is out of range
    pub fn validate(&self) -> Result<(), AuditError> {
        validate_api_key(&self.api_key)?;
        if self.base_url.trim().is_empty() {
            return Err(AuditError::Config("base_url is empty".into()));
        }
        if self.page_size == 0 {
            return Err(AuditError::Config("page_size must be at least 1".into()));
        }
        if self.max_pages == 0 {
            return Err(AuditError::Config("max_pages must be at least 1".into()));
        }
        if self.max_retries == 0 {
            return Err(AuditError::Config("max_retries must be at least 1".into()));
        }
        for (name, secs) in [
            ("retry_delay_secs", self.retry_delay_secs),
            ("rate_limit_delay_secs", self.rate_limit_delay_secs),
        ] {
            if !(secs.is_finite() && (0.0..=MAX_DELAY_SECS).contains(&secs)) {
                return Err(AuditError::Config(format!(
                    "{name} must be between 0 and {MAX_DELAY_SECS} seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        delay_from_secs(self.retry_delay_secs)
    }

    #[must_use]
    pub fn rate_limit_delay(&self) -> Duration {
        delay_from_secs(self.rate_limit_delay_secs)
    }
}

/// Clamped into `0..=MAX_DELAY_SECS`; NaN reads as zero.
fn delay_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0).min(MAX_DELAY_SECS)).unwrap_or_default()
}

/// # Errors
///
/// Will return `Err` if the key is shorter than 10 characters or contains
/// whitespace
pub fn validate_api_key(api_key: &str) -> Result<String, AuditError> {
    let key = api_key.trim();
    if key.is_empty() {
        return Err(AuditError::Config(format!(
            "api key not set; pass --api-key, set api_key in the config toml, or set {API_KEY_ENV}"
        )));
    }
    if key.chars().count() < MIN_API_KEY_LEN {
        return Err(AuditError::Config(format!(
            "api key must be at least {MIN_API_KEY_LEN} characters"
        )));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AuditError::Config("api key contains whitespace".into()));
    }
    Ok(key.to_string())
}

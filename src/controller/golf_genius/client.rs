use crate::config::{AuditConfig, validate_api_key};
use crate::error::AuditError;
use crate::model::truncate_for_log;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub type QueryParams = BTreeMap<String, String>;

const MAX_BACKOFF: Duration = Duration::from_secs(8);
const BODY_PREVIEW_CHARS: usize = 200;

#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// GET `path` (relative to the credentialed api root) and decode the body.
    async fn fetch(&self, path: &str, query: &QueryParams) -> Result<Value, AuditError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &AuditConfig) -> Self {
        Self {
            max_attempts: config.max_retries.max(1),
            base_delay: config.retry_delay(),
            max_delay: MAX_BACKOFF,
        }
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `op` until it succeeds, fails with a non-transient error, or the
/// policy's attempts are used up. The last transient error is returned then.
///
/// # Errors
///
/// Will return `Err` with whatever the final attempt failed with
pub async fn retry_transient<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut op: F,
) -> Result<T, AuditError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AuditError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    "{what}: attempt {attempt}/{} failed ({err}), retrying in {delay:?}",
                    policy.max_attempts
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            other => return other,
        }
    }
}

/// Keeps consecutive request starts at least `min_interval` apart.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}

/// Maps a non-2xx status to the error taxonomy. `None` means success.
#[must_use]
pub fn classify_status(status: u16, body: &str) -> Option<AuditError> {
    let preview = truncate_for_log(body.trim(), BODY_PREVIEW_CHARS);
    match status {
        200..=299 => None,
        401 | 403 => Some(AuditError::Auth(format!(
            "HTTP {status}: invalid api key or authentication failed"
        ))),
        408 | 429 => Some(AuditError::Transient(format!("HTTP {status}: {preview}"))),
        500..=599 => Some(AuditError::Transient(format!("HTTP {status}: {preview}"))),
        _ => Some(AuditError::Request(format!("HTTP {status}: {preview}"))),
    }
}

/// # Errors
///
/// Will return `Err` if the body is not valid JSON
pub fn decode_body(body: &str) -> Result<Value, AuditError> {
    serde_json::from_str(body).map_err(|e| {
        let preview = if body.trim().is_empty() {
            "(empty response)".to_string()
        } else {
            truncate_for_log(body.trim(), BODY_PREVIEW_CHARS)
        };
        AuditError::MalformedResponse(format!("invalid JSON ({e}); content: {preview}"))
    })
}

pub struct HttpFetcher {
    client: Client,
    base_url: String,
    api_key: String,
    retry_policy: RetryPolicy,
    throttle: Throttle,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Will return `Err` if the config fails validation or the http client
    /// can't be built
    pub fn new(config: &AuditConfig) -> Result<Self, AuditError> {
        config.validate()?;
        let api_key = validate_api_key(&config.api_key)?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AuditError::Config(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            retry_policy: RetryPolicy::from_config(config),
            throttle: Throttle::new(config.rate_limit_delay()),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.api_key, path.trim_start_matches('/'))
    }

    async fn fetch_once(&self, url: &str, query: &QueryParams) -> Result<Value, AuditError> {
        self.throttle.wait().await;
        let resp = self.client.get(url).query(query).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if let Some(err) = classify_status(status, &body) {
            return Err(err);
        }
        decode_body(&body)
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, path: &str, query: &QueryParams) -> Result<Value, AuditError> {
        let url = self.url_for(path);
        debug!("GET {path} {query:?}");
        retry_transient(&self.retry_policy, path, || self.fetch_once(&url, query)).await
    }
}

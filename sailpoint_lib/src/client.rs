//! Retrying, optionally paced wrapper around the API client.

use std::sync::Mutex;
use std::time::Duration;

use rand::Rng;
use sailpoint_api::types::{AccessProfile, Account, Page, SearchDocument, Transform, Workgroup};
use sailpoint_api::{Client, Configuration, ListQuery, SearchQuery};
use tokio::time::Instant;

use crate::error::SailPointError;

/// Backoff settings for transport-level retries.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 2000,
            max_delay_ms: 30000,
        }
    }
}

impl RetryConfig {
    /// Reads `SAIL_RETRY_MAX`, `SAIL_RETRY_BASE_MS` and `SAIL_RETRY_MAX_MS`,
    /// falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_retries: parse_or(lookup("SAIL_RETRY_MAX"), defaults.max_retries),
            base_delay_ms: parse_or(lookup("SAIL_RETRY_BASE_MS"), defaults.base_delay_ms),
            max_delay_ms: parse_or(lookup("SAIL_RETRY_MAX_MS"), defaults.max_delay_ms),
        }
    }

    fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// API client wrapper that retries rate-limited and failed requests.
///
/// 429, 5xx and connection failures are retried with exponential backoff;
/// a `Retry-After` hint from the server is honoured up to the configured
/// maximum delay. An optional minimum interval spaces consecutive requests.
pub struct RetryingClient {
    inner: Client,
    retry: RetryConfig,
    min_interval: Option<Duration>,
    /// Tracks when the last HTTP request was sent, for pacing.
    last_request: Mutex<Option<Instant>>,
}

impl RetryingClient {
    pub fn new(config: Configuration) -> Result<Self, SailPointError> {
        Ok(Self::from_client(Client::new(config)?))
    }

    /// Creates a client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str) -> Result<Self, SailPointError> {
        Ok(Self::from_client(Client::with_base_url(base_url)?))
    }

    pub fn from_client(inner: Client) -> Self {
        Self {
            inner,
            retry: RetryConfig::default(),
            min_interval: None,
            last_request: Mutex::new(None),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Spaces consecutive requests at least `interval` apart.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    pub fn inner(&self) -> &Client {
        &self.inner
    }

    async fn pace(&self) {
        let Some(interval) = self.min_interval else {
            return;
        };
        let last = *self.last_request.lock().unwrap_or_else(|e| e.into_inner());
        let sleep_dur = last
            .map(|t| t.elapsed())
            .filter(|elapsed| *elapsed < interval)
            .map(|elapsed| interval - elapsed);
        if let Some(dur) = sleep_dur {
            tokio::time::sleep(dur).await;
        }
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    async fn with_retry<T, F, Fut>(&self, label: &str, mut f: F) -> Result<T, SailPointError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, sailpoint_api::Error>>,
    {
        let mut attempt = 0usize;
        loop {
            self.pace().await;
            match f().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.retry.max_retries || !is_retryable(&err) {
                        return Err(err.into());
                    }
                    let delay = match &err {
                        sailpoint_api::Error::RateLimited {
                            retry_after: Some(hint),
                        } => (*hint).min(Duration::from_millis(self.retry.max_delay_ms)),
                        _ => self.retry.delay_for_attempt(attempt),
                    };
                    tracing::warn!(
                        "{} request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        label,
                        attempt,
                        self.retry.max_retries,
                        delay.as_secs_f64(),
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    pub async fn list_accounts(&self, query: &ListQuery) -> Result<Page<Account>, SailPointError> {
        self.with_retry("accounts", || self.inner.list_accounts(query))
            .await
    }

    pub async fn list_access_profiles(
        &self,
        query: &ListQuery,
    ) -> Result<Page<AccessProfile>, SailPointError> {
        self.with_retry("access-profiles", || self.inner.list_access_profiles(query))
            .await
    }

    pub async fn list_transforms(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Transform>, SailPointError> {
        self.with_retry("transforms", || self.inner.list_transforms(query))
            .await
    }

    pub async fn list_workgroups(
        &self,
        query: &ListQuery,
    ) -> Result<Page<Workgroup>, SailPointError> {
        self.with_retry("workgroups", || self.inner.list_workgroups(query))
            .await
    }

    pub async fn search_post(
        &self,
        query: &SearchQuery,
    ) -> Result<Page<SearchDocument>, SailPointError> {
        self.with_retry("search", || self.inner.search_post(query))
            .await
    }
}

fn is_retryable(err: &sailpoint_api::Error) -> bool {
    match err {
        sailpoint_api::Error::RequestFailed => true,
        sailpoint_api::Error::RateLimited { .. } => true,
        sailpoint_api::Error::HttpStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

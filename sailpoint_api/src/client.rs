//! HTTP client for the identity platform REST API.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{ListQuery, Query, SearchQuery},
    types::{AccessProfile, Account, Page, SearchDocument, Transform, Workgroup},
    Configuration, Error,
};

const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// API generation a path lives under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    V3,
    Beta,
}

impl ApiVersion {
    fn prefix(&self) -> &'static str {
        match self {
            ApiVersion::V3 => "/v3",
            ApiVersion::Beta => "/beta",
        }
    }
}

/// HTTP client for one tenant.
///
/// Each call performs exactly one request and returns one [`Page`]. There
/// is no retry here; see `sailpoint_lib::RetryingClient` for that.
pub struct Client {
    config: Configuration,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client from an explicit configuration.
    pub fn new(config: Configuration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self { config, http })
    }

    /// Creates an unauthenticated client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(Configuration::new(base_url))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    fn get_url(&self, version: ApiVersion, path: &str, query: &impl Query) -> Result<Url, Error> {
        let raw = format!("{}{}{}", &self.config.base_url, version.prefix(), path);
        let url = Url::parse(&raw).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(raw.clone())
        })?;
        Ok(query.add_to_url(&url))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("accept", "application/json");
        match &self.config.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
    {
        let resp = self.authorize(builder).send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let total = total_count(resp.headers());
        let retry_after = retry_after(resp.headers());
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Rate limited (retry after {:?})", retry_after);
            return Err(Error::RateLimited { retry_after });
        }

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let items = serde_json::from_str::<Vec<T>>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::Deserialize(e.to_string())
        })?;

        Ok(Page::new(items, total))
    }

    async fn list<T>(&self, version: ApiVersion, path: &str, query: &ListQuery) -> Result<Page<T>, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(version, path, query)?;
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }

    /// Fetches one page of accounts.
    pub async fn list_accounts(&self, query: &ListQuery) -> Result<Page<Account>, Error> {
        self.list(ApiVersion::V3, "/accounts", query).await
    }

    /// Fetches one page of access profiles.
    pub async fn list_access_profiles(
        &self,
        query: &ListQuery,
    ) -> Result<Page<AccessProfile>, Error> {
        self.list(ApiVersion::V3, "/access-profiles", query).await
    }

    /// Fetches one page of transforms.
    pub async fn list_transforms(&self, query: &ListQuery) -> Result<Page<Transform>, Error> {
        self.list(ApiVersion::V3, "/transforms", query).await
    }

    /// Fetches one page of governance groups from the beta API.
    pub async fn list_workgroups(&self, query: &ListQuery) -> Result<Page<Workgroup>, Error> {
        self.list(ApiVersion::Beta, "/workgroups", query).await
    }

    /// Runs one page of a search. The search body is posted as JSON; offset
    /// and limit travel on the query string.
    pub async fn search_post(&self, query: &SearchQuery) -> Result<Page<SearchDocument>, Error> {
        let url = self.get_url(ApiVersion::V3, "/search", query)?;
        tracing::debug!(%url, indices = ?query.search.indices, "POST");
        self.send(self.http.post(url).json(&query.search)).await
    }
}

fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn total_count_parses_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(total_count(&headers), None);
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("1500"));
        assert_eq!(total_count(&headers), Some(1500));
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("lots"));
        assert_eq!(total_count(&headers), None);
    }

    #[test]
    fn retry_after_in_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() <= 2000 + "...[truncated]".len());
    }

    #[test]
    fn url_includes_version_prefix() {
        let client = Client::with_base_url("https://acme.example.com/").unwrap();
        let url = client
            .get_url(ApiVersion::Beta, "/workgroups", &ListQuery::default())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://acme.example.com/beta/workgroups?offset=0&count=true"
        );
    }
}

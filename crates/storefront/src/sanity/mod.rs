//! Sanity content store client.
//!
//! # Architecture
//!
//! - GROQ queries over the HTTP query API (`GET .../data/query/<dataset>`)
//! - Parameters are always bound out-of-band as `$name` JSON values
//! - Two read modes: [`ReadMode::Cached`] goes through the API CDN and an
//!   in-process `moka` cache for the revalidation window; [`ReadMode::Fresh`]
//!   hits the live API and is never cached
//! - Results come back as untyped JSON; [`documents`] validates them
//!
//! The catalog talks to this client through the [`ContentSource`] trait so
//! that the store can be swapped out in tests.

pub mod documents;
pub mod image;
pub mod queries;

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::SanityConfig;

/// Errors that can occur when querying the content store.
#[derive(Debug, Error)]
pub enum SanityError {
    /// HTTP request failed (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The query was rejected (syntax error, unknown parameter).
    #[error("Query error: {0}")]
    Query(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The query URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The result did not have the expected shape.
    #[error("Unexpected result shape: {0}")]
    Shape(String),
}

/// How a query is read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// API CDN plus in-process cache for the revalidation window.
    Cached,
    /// Live API, never cached.
    Fresh,
}

impl ReadMode {
    const fn host(self) -> &'static str {
        match self {
            Self::Cached => "apicdn.sanity.io",
            Self::Fresh => "api.sanity.io",
        }
    }
}

/// Which document revisions a query sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Perspective {
    /// Published documents only.
    #[default]
    Published,
    /// Published documents and drafts side by side (requires a token).
    Raw,
}

impl Perspective {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Raw => "raw",
        }
    }
}

/// A named GROQ query with its bound parameters.
#[derive(Debug, Clone)]
pub struct Query {
    name: &'static str,
    groq: Cow<'static, str>,
    params: Vec<(&'static str, Value)>,
    perspective: Perspective,
}

impl Query {
    /// Create a query. `name` is used for logging only.
    #[must_use]
    pub fn new(name: &'static str, groq: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name,
            groq: groq.into(),
            params: Vec::new(),
            perspective: Perspective::Published,
        }
    }

    /// Bind `$name` to a JSON value.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.params.push((name, value.into()));
        self
    }

    /// Read with a different perspective.
    #[must_use]
    pub const fn perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn groq(&self) -> &str {
        &self.groq
    }

    #[must_use]
    pub fn params(&self) -> &[(&'static str, Value)] {
        &self.params
    }
}

/// Something that can answer GROQ queries.
pub trait ContentSource: Send + Sync {
    /// Run `query` and return its `result` member.
    fn query(
        &self,
        query: &Query,
        mode: ReadMode,
    ) -> impl Future<Output = Result<Value, SanityError>> + Send;
}

// =============================================================================
// SanityClient
// =============================================================================

/// Client for the Sanity HTTP query API.
///
/// Cheap to clone; all clones share one connection pool and one cache.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    project_id: String,
    dataset: String,
    api_version: String,
    token: Option<SecretString>,
    cache: Cache<String, Value>,
}

impl SanityClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &SanityConfig) -> Result<Self, SanityError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.revalidate)
            .build();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("la-fleur-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(SanityClientInner {
                client,
                project_id: config.project_id.clone(),
                dataset: config.dataset.clone(),
                api_version: config.api_version.trim_start_matches('v').to_string(),
                token: config.read_token.clone(),
                cache,
            }),
        })
    }

    /// Project the client reads from.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Dataset the client reads from.
    #[must_use]
    pub fn dataset(&self) -> &str {
        &self.inner.dataset
    }

    /// Whether a read token is configured.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner.token.is_some()
    }

    /// Build the full query URL for `query` in `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the project id produces an invalid host.
    pub fn query_url(&self, query: &Query, mode: ReadMode) -> Result<Url, SanityError> {
        let mut url = Url::parse(&format!(
            "https://{}.{}/v{}/data/query/{}",
            self.inner.project_id,
            mode.host(),
            self.inner.api_version,
            self.inner.dataset
        ))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query.groq().trim());
            for (name, value) in query.params() {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
            pairs.append_pair("perspective", query.perspective.as_str());
        }

        Ok(url)
    }

    /// Execute a query against the API.
    async fn execute(&self, url: Url, mode: ReadMode) -> Result<Value, SanityError> {
        let mut request = self.inner.client.get(url);

        // The CDN serves public content only; tokens go to the live API.
        if mode == ReadMode::Fresh
            && let Some(token) = &self.inner.token
        {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SanityError::RateLimited(retry_after));
        }

        let body = response.text().await?;
        parse_response(status.as_u16(), &body)
    }
}

impl ContentSource for SanityClient {
    #[instrument(skip(self, query), fields(query = query.name(), mode = ?mode))]
    async fn query(&self, query: &Query, mode: ReadMode) -> Result<Value, SanityError> {
        let url = self.query_url(query, mode)?;

        if mode == ReadMode::Fresh {
            return self.execute(url, mode).await;
        }

        let cache_key = url.to_string();
        if let Some(value) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for query");
            return Ok(value);
        }

        let value = self.execute(url, mode).await?;
        self.inner.cache.insert(cache_key, value.clone()).await;
        Ok(value)
    }
}

impl std::fmt::Debug for SanityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityClient")
            .field("project_id", &self.inner.project_id)
            .field("dataset", &self.inner.dataset)
            .field("api_version", &self.inner.api_version)
            .field("token", &self.inner.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Response Parsing
// =============================================================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    error: Option<QueryErrorBody>,
}

#[derive(Debug, Deserialize)]
struct QueryErrorBody {
    description: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl QueryErrorBody {
    fn message(&self) -> String {
        match (&self.kind, &self.description) {
            (Some(kind), Some(description)) => format!("{kind}: {description}"),
            (None, Some(description)) => description.clone(),
            (Some(kind), None) => kind.clone(),
            (None, None) => "(no error details provided)".to_string(),
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

/// Turn a raw API response into the query's `result`.
fn parse_response(status: u16, body: &str) -> Result<Value, SanityError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<QueryResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| truncate(body), |e| e.message());
        tracing::error!(status, message = %message, "Sanity API returned non-success status");
        return Err(SanityError::Status { status, message });
    }

    let response: QueryResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, body = %truncate(body), "Failed to parse Sanity response");
        SanityError::Parse(e)
    })?;

    if let Some(error) = response.error {
        return Err(SanityError::Query(error.message()));
    }

    Ok(response.result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use serde_json::json;

    fn config() -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            read_token: None,
            revalidate: Duration::from_secs(60),
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_query_url_hosts() {
        let client = SanityClient::new(&config()).unwrap();
        let query = Query::new("all", "*[_type == \"product\"]");

        let cached = client.query_url(&query, ReadMode::Cached).unwrap();
        assert_eq!(cached.host_str(), Some("abc123.apicdn.sanity.io"));
        assert_eq!(cached.path(), "/v2024-01-01/data/query/production");

        let fresh = client.query_url(&query, ReadMode::Fresh).unwrap();
        assert_eq!(fresh.host_str(), Some("abc123.api.sanity.io"));
    }

    #[test]
    fn test_query_url_params_are_json() {
        let client = SanityClient::new(&config()).unwrap();
        let query = Query::new("by-slug", queries::PRODUCT_BY_SLUG).param("slug", "rose-petal");
        let url = client.query_url(&query, ReadMode::Cached).unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("$slug".to_string(), "\"rose-petal\"".to_string())));
        assert!(pairs.contains(&("perspective".to_string(), "published".to_string())));
        assert!(
            pairs
                .iter()
                .any(|(k, v)| k == "query" && v.contains("slug.current == $slug"))
        );
    }

    #[test]
    fn test_query_url_raw_perspective() {
        let client = SanityClient::new(&config()).unwrap();
        let query = Query::new("audit", queries::PRODUCT_AUDIT).perspective(Perspective::Raw);
        let url = client.query_url(&query, ReadMode::Fresh).unwrap();
        assert!(url.query().unwrap().contains("perspective=raw"));
    }

    #[test]
    fn test_api_version_prefix_tolerated() {
        let mut config = config();
        config.api_version = "v2025-02-19".to_string();
        let client = SanityClient::new(&config).unwrap();
        let url = client
            .query_url(&Query::new("all", "*"), ReadMode::Fresh)
            .unwrap();
        assert_eq!(url.path(), "/v2025-02-19/data/query/production");
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut config = config();
        config.read_token = Some(SecretString::from("sk-very-secret"));
        let client = SanityClient::new(&config).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(client.has_token());
    }

    #[test]
    fn test_parse_response_result() {
        let value = parse_response(200, r#"{"ms": 4, "query": "*", "result": [{"_id": "a"}]}"#)
            .unwrap();
        assert_eq!(value, json!([{ "_id": "a" }]));
    }

    #[test]
    fn test_parse_response_null_result() {
        let value = parse_response(200, r#"{"ms": 1, "result": null}"#).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_parse_response_status_error() {
        let err = parse_response(
            400,
            r#"{"error": {"description": "param $slug referenced, but not provided", "type": "queryParseError"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP 400: queryParseError: param $slug referenced, but not provided"
        );
    }

    #[test]
    fn test_parse_response_non_json_error() {
        let err = parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SanityError::Status { status: 502, .. }));
    }

    #[test]
    fn test_parse_response_malformed_body() {
        let err = parse_response(200, "not json").unwrap_err();
        assert!(matches!(err, SanityError::Parse(_)));
    }

    #[test]
    fn test_rate_limited_error() {
        let err = SanityError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}

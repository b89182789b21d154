//! HTTP client for the locations REST API
//!
//! `Transport` is the seam between the query service and the network so that
//! the service can be exercised against an in-memory fake.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::QueryParams;

/// Default base URL of the API
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned status {status}")]
    Server { status: u16 },

    /// The requested resource does not exist
    #[error("Resource not found")]
    NotFound,

    /// The body could not be decoded into the expected shape
    #[error("Failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A payload failed client-side validation
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// The base URL or a joined path is not a valid URL
    #[error("Invalid URL: {0}")]
    Url(String),
}

impl ApiError {
    /// Maps an HTTP status to an error, `None` for success codes
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            None
        } else if status == StatusCode::NOT_FOUND {
            Some(ApiError::NotFound)
        } else {
            Some(ApiError::Server {
                status: status.as_u16(),
            })
        }
    }
}

/// JSON request transport
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `GET {base}{path}?{query}` and returns the decoded body
    async fn get(&self, path: &str, query: &QueryParams) -> Result<Value, ApiError>;

    /// Issues `POST {base}{path}` with a JSON body and returns the decoded body
    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError>;
}

/// Checks that `raw` is an absolute http(s) URL and strips trailing slashes
pub fn parse_base_url(raw: &str) -> Result<String, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::Url(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ApiError::Url(format!(
                "{}: unsupported scheme '{}'",
                raw, other
            )))
        }
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// `Transport` over reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Creates a client for `base_url` with the default timeout
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client for `base_url` with a per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .user_agent(concat!("roamy/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Joins the base URL with an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn decode(response: reqwest::Response) -> Result<Value, ApiError> {
        if let Some(err) = ApiError::from_status(response.status()) {
            return Err(err);
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<Value, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, query = %query.to_query_string(), "GET");

        let pairs: Vec<(&str, &str)> = query.pairs().collect();
        let response = self.client.get(&url).query(&pairs).send().await?;
        Self::decode(response).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(&body).send().await?;
        Self::decode(response).await
    }
}

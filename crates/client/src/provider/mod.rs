//! External joke provider client.
//!
//! Provides a client for the JokeAPI-style two-part joke endpoint with
//! request validation and defensive response normalization.
//!
//! ### Specification
//!
//! - **Endpoint**: `GET {base}/{category}` with the category
//!   percent-encoded into the path.
//! - **Parameters**: `type=twopart`, `amount`, valueless `safe-mode`, and
//!   a comma-joined `blacklistFlags` exclusion list.
//! - **Statuses**: any non-2xx response means the provider does not know
//!   the category; timeouts and transport failures are reported
//!   separately so callers can treat them as retryable.
//! - **Normalization**: the payload may be a joke list, a single joke
//!   object, or an error object; all three parse into one lenient
//!   [`ProviderPayload`].

pub mod error;
pub mod request;
pub mod response;

pub use error::ProviderError;
pub use request::{BlacklistFlag, DEFAULT_BLACKLIST, JokeKind, JokeRequest};
pub use response::{ProviderJoke, ProviderPayload};

use async_trait::async_trait;
use reqwest::header;
use std::time::{Duration, Instant};
use url::Url;

/// Default base URL for the joke provider.
const DEFAULT_BASE_URL: &str = "https://v2.jokeapi.dev/joke";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "mcp-jokebook/0.1";

/// Joke provider client configuration.
#[derive(Debug, Clone)]
pub struct JokeApiConfig {
    /// Base URL (default: https://v2.jokeapi.dev/joke).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: mcp-jokebook/0.x).
    pub user_agent: String,
}

impl Default for JokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Boundary to the external joke provider.
///
/// Implemented by [`JokeApiClient`] and by test stubs, so resolution
/// logic can be exercised without a network.
#[async_trait]
pub trait JokeProvider: Send + Sync {
    /// Fetch jokes for the request's category.
    async fn fetch_jokes(&self, req: &JokeRequest) -> Result<ProviderPayload, ProviderError>;
}

/// HTTP client for the joke provider.
#[derive(Debug, Clone)]
pub struct JokeApiClient {
    http: reqwest::Client,
    config: JokeApiConfig,
}

impl JokeApiClient {
    /// Create a new provider client with the given configuration.
    pub fn new(config: JokeApiConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { http, config })
    }

    /// Build the category endpoint URL, escaping the category name.
    fn category_url(&self, category: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| ProviderError::InvalidBaseUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidBaseUrl("base URL cannot carry path segments".to_string()))?
            .push(category);

        Ok(url)
    }
}

#[async_trait]
impl JokeProvider for JokeApiClient {
    /// Execute one category fetch.
    ///
    /// This method handles request validation, status triage, and payload
    /// parsing; it never inspects joke shapes (that is normalization's
    /// job).
    async fn fetch_jokes(&self, req: &JokeRequest) -> Result<ProviderPayload, ProviderError> {
        req.validate()?;

        let url = self.category_url(&req.category)?;
        let start = Instant::now();

        tracing::debug!("fetching jokes: category={}", req.category);

        let http_response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("provider response status: {}", status);

        if status.is_client_error() || status.is_server_error() {
            return Err(ProviderError::CategoryUnknown { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let payload: ProviderPayload =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;

        tracing::debug!(
            "fetch completed in {:?}, {} entries",
            start.elapsed(),
            payload.jokes.as_ref().map(|j| j.len()).unwrap_or(1)
        );

        Ok(payload)
    }
}

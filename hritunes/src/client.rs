//! HTTP client for the iTunes Search API

use crate::error::{ItunesError, Result};
use crate::models::{Podcast, SearchResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default iTunes Search API base URL
pub const DEFAULT_API_BASE: &str = "https://itunes.apple.com";

/// Maximum number of results requested per search
pub const SEARCH_LIMIT: u32 = 25;

/// Default timeout for HTTP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "hritunes/0.1.0";

/// iTunes podcast search client
///
/// # Example
///
/// ```no_run
/// use hritunes::ItunesClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = ItunesClient::new()?;
///     for podcast in client.search_podcasts("radio france").await? {
///         println!("{} by {}", podcast.collection_name, podcast.artist_name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ItunesClient {
    client: Client,
    api_base: String,
    request_timeout: Duration,
}

impl ItunesClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Search podcasts matching `term` (at most 25 results)
    ///
    /// An empty or blank term fails with [`ItunesError::BadRequest`] without
    /// any network call.
    pub async fn search_podcasts(&self, term: &str) -> Result<Vec<Podcast>> {
        if term.trim().is_empty() {
            return Err(ItunesError::bad_request("Missing search term"));
        }

        let mut url = Url::parse(&format!("{}/search", self.api_base.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("term", term)
            .append_pair("media", "podcast")
            .append_pair("limit", &SEARCH_LIMIT.to_string());

        debug!(term, "Searching iTunes podcasts");

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ItunesError::Upstream {
                status: status.as_u16(),
                message: status.to_string(),
            });
        }

        // iTunes répond en text/javascript, on décode nous-mêmes
        let bytes = response.bytes().await?;
        let search: SearchResponse = serde_json::from_slice(&bytes)?;
        let podcasts = search.into_podcasts();

        debug!("Found {} podcasts for '{}'", podcasts.len(), term);
        Ok(podcasts)
    }
}

/// Builder for [`ItunesClient`]
pub struct ClientBuilder {
    client: Option<Client>,
    api_base: String,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set a custom User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ItunesClient> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.request_timeout)
                .build()?,
        };

        Ok(ItunesClient {
            client,
            api_base: self.api_base,
            request_timeout: self.request_timeout,
        })
    }
}

//! HTTP client for the Navidrome (Subsonic) API

use crate::error::{NavidromeError, Result};
use crate::models::{CoverArt, Playlist, SubsonicEnvelope};
use crate::signing;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default timeout for HTTP requests
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "hrnavidrome/0.1.0";

/// Navidrome HTTP client
///
/// Every request is signed with a fresh salt (see [`signing`]).
///
/// # Example
///
/// ```no_run
/// use hrnavidrome::NavidromeClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = NavidromeClient::builder()
///         .base_url("http://navidrome.local:4533")
///         .username("alice")
///         .password("secret")
///         .build()?;
///
///     for playlist in client.get_playlists().await? {
///         println!("{} ({:?} songs)", playlist.name, playlist.song_count);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct NavidromeClient {
    client: Client,
    base_url: Url,
    username: String,
    password: String,
    request_timeout: Duration,
}

impl NavidromeClient {
    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Signed URL of a Subsonic endpoint (`/rest/{view}`)
    fn endpoint(&self, view: &str) -> Result<Url> {
        let mut url = self.base_url.join(&format!("/rest/{}", view))?;
        signing::sign(&mut url, &self.username, &self.password);
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<Response> {
        debug!(endpoint = url.path(), "Navidrome request");

        let response = self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(NavidromeError::from_status_code(status.as_u16(), message));
        }

        Ok(response)
    }

    /// Fetch all playlists visible to the configured user
    ///
    /// Returns an empty list when the response carries no `playlists` node.
    pub async fn get_playlists(&self) -> Result<Vec<Playlist>> {
        let url = self.endpoint("getPlaylists.view")?;
        let response = self.send(url).await?;
        let status = response.status().as_u16();

        let bytes = response.bytes().await?;
        let envelope: SubsonicEnvelope = serde_json::from_slice(&bytes)?;

        let playlists = envelope
            .into_result(status)?
            .and_then(|r| r.playlists)
            .map(|node| node.playlist)
            .unwrap_or_default();

        debug!("Received {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Fetch the cover art `id`, optionally scaled to `size` pixels
    pub async fn get_cover_art(&self, id: &str, size: Option<u32>) -> Result<CoverArt> {
        let mut url = self.endpoint("getCoverArt.view")?;
        url.query_pairs_mut().append_pair("id", id);
        if let Some(size) = size {
            url.query_pairs_mut().append_pair("size", &size.to_string());
        }

        let response = self.send(url).await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await?;

        // Les erreurs Subsonic arrivent en JSON avec un statut 200
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
        {
            let envelope: SubsonicEnvelope = serde_json::from_slice(&bytes)?;
            envelope.into_result(status)?;
            return Err(NavidromeError::Upstream {
                status,
                message: format!("Unexpected JSON response for cover art {}", id),
            });
        }

        Ok(CoverArt {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// Builder for [`NavidromeClient`]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    request_timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: None,
            username: None,
            password: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

fn required(value: Option<String>, what: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(NavidromeError::configuration(format!(
            "Missing Navidrome {}",
            what
        ))),
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

    /// Set the server URL (e.g. `http://navidrome.local:4533`)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Clear text password, only ever sent hashed
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
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
    ///
    /// Fails with [`NavidromeError::Configuration`] if the base URL, the
    /// username or the password is missing.
    pub fn build(self) -> Result<NavidromeClient> {
        let base_url = required(self.base_url, "base URL")?;
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;

        let base_url = Url::parse(&base_url)?;

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .user_agent(&self.user_agent)
                .timeout(self.request_timeout)
                .build()?,
        };

        Ok(NavidromeClient {
            client,
            base_url,
            username,
            password,
            request_timeout: self.request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_are_configuration_errors() {
        let result = NavidromeClient::builder()
            .username("alice")
            .password("secret")
            .build();
        assert!(matches!(result, Err(NavidromeError::Configuration(_))));

        let result = NavidromeClient::builder()
            .base_url("http://navidrome.local")
            .password("secret")
            .build();
        assert!(matches!(result, Err(NavidromeError::Configuration(_))));

        let result = NavidromeClient::builder()
            .base_url("http://navidrome.local")
            .username("alice")
            .password("")
            .build();
        assert!(matches!(result, Err(NavidromeError::Configuration(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = NavidromeClient::builder()
            .base_url("not a url")
            .username("alice")
            .password("secret")
            .build();
        assert!(matches!(result, Err(NavidromeError::InvalidUrl(_))));
    }

    #[test]
    fn test_endpoint_ignores_base_path() {
        let client = NavidromeClient::builder()
            .base_url("http://navidrome.local:4533/app/")
            .username("alice")
            .password("secret")
            .build()
            .unwrap();

        let url = client.endpoint("getPlaylists.view").unwrap();
        assert_eq!(url.path(), "/rest/getPlaylists.view");
        assert_eq!(url.port(), Some(4533));
    }
}

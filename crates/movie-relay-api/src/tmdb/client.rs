//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::types::{Credential, UpstreamResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default timeout for a whole upstream request/response cycle.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
///
/// Holds no credential; each call takes the caller's [`Credential`].
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (config or wiremock in tests).
    ///
    /// Should end with `/` so relative paths keep the version prefix.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a GET with the credential and query params, returning the raw
    /// status and body. Any status is `Ok`; only transport failures are `Err`.
    ///
    /// The request URL carries the credential, so it is stripped from
    /// transport errors before they propagate.
    #[instrument(skip(self, credential, query))]
    async fn get_raw(
        &self,
        path: &str,
        credential: &Credential,
        query: &[(&str, &str)],
    ) -> Result<UpstreamResponse> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let request = self
            .http_client
            .get(url)
            .query(&[("api_key", credential.expose())])
            .query(query)
            .build()
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(path, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to read response body: {path}"))?;

        tracing::debug!(path, %status, bytes = body.len(), "TMDB API response");

        Ok(UpstreamResponse { status, body })
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn popular_movies(&self, credential: &Credential) -> Result<UpstreamResponse> {
        self.get_raw("movie/popular", credential, &[]).await
    }

    #[instrument(skip_all)]
    async fn search_movies(
        &self,
        credential: &Credential,
        query: &str,
    ) -> Result<UpstreamResponse> {
        self.get_raw("search/movie", credential, &[("query", query)])
            .await
    }

    #[instrument(skip(self, credential))]
    async fn movie_details(
        &self,
        credential: &Credential,
        movie_id: i64,
    ) -> Result<UpstreamResponse> {
        let path = format!("movie/{movie_id}");
        self.get_raw(&path, credential, &[]).await
    }
}

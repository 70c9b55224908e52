//! `MovieRelay` - forwards the three movie operations to TMDB.
//!
//! Every operation checks its preconditions before touching the network,
//! issues exactly one upstream GET, and maps the upstream status:
//!
//! | Operation        | 2xx                         | Non-2xx                                  |
//! |------------------|-----------------------------|------------------------------------------|
//! | `popular_movies` | first 20 `results` entries  | status passed through                    |
//! | `search_movies`  | upstream JSON verbatim      | status passed through                    |
//! | `movie_by_id`    | upstream JSON verbatim      | 404 is `Movie not found`, else passed through |

use anyhow::Context;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use movie_relay_api::tmdb::{Credential, MovieList, TmdbApi, UpstreamResponse};
use serde::de::IgnoredAny;
use tracing::instrument;

use crate::error::RelayError;

/// Maximum number of entries returned by `popular_movies`.
pub const POPULAR_LIMIT: usize = 20;

const POPULAR_ERROR: &str = "Error fetching movies from TMDB API";
const SEARCH_ERROR: &str = "Error searching movies from TMDB API";
const MOVIE_ERROR: &str = "Error fetching movie from TMDB API";
const QUERY_REQUIRED: &str = "Search query is required";

/// A JSON body returned to the caller with status 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody(pub Bytes);

impl IntoResponse for JsonBody {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/json")], self.0).into_response()
    }
}

/// The relay: an upstream API plus the credential injected into every call.
#[derive(Debug)]
pub struct MovieRelay<A> {
    api: A,
    credential: Option<Credential>,
}

impl<A: TmdbApi> MovieRelay<A> {
    /// Creates a relay. A `None` credential makes every operation fail with
    /// [`RelayError::NotConfigured`] without calling `api`.
    pub const fn new(api: A, credential: Option<Credential>) -> Self {
        Self { api, credential }
    }

    fn credential(&self) -> Result<&Credential, RelayError> {
        self.credential.as_ref().ok_or(RelayError::NotConfigured)
    }

    /// Returns at most the first [`POPULAR_LIMIT`] popular movies as
    /// `{"results":[...]}`. Entries are echoed byte-for-byte.
    ///
    /// # Errors
    ///
    /// - [`RelayError::NotConfigured`] without a credential.
    /// - [`RelayError::Upstream`] on a non-success upstream status.
    /// - [`RelayError::Internal`] on transport failure or a body without a
    ///   `results` array.
    #[instrument(skip_all)]
    pub async fn popular_movies(&self) -> Result<JsonBody, RelayError> {
        let credential = self.credential()?;
        let upstream = self.api.popular_movies(credential).await?;
        let body = success_body(upstream, POPULAR_ERROR)?;

        let list = MovieList::from_slice(&body)
            .context("failed to decode popular movies response")?
            .take_first(POPULAR_LIMIT);
        let encoded = serde_json::to_vec(&list).context("failed to encode popular movies")?;

        tracing::debug!(count = list.results.len(), "popular movies relayed");
        Ok(JsonBody(Bytes::from(encoded)))
    }

    /// Searches movies by title and returns the upstream body verbatim.
    ///
    /// `query` is `None` when the caller did not send one.
    ///
    /// # Errors
    ///
    /// - [`RelayError::NotConfigured`] without a credential.
    /// - [`RelayError::Validation`] for a missing or empty query.
    /// - [`RelayError::Upstream`] on a non-success upstream status.
    /// - [`RelayError::Internal`] on transport failure or a body that is not
    ///   JSON.
    #[instrument(skip_all)]
    pub async fn search_movies(&self, query: Option<&str>) -> Result<JsonBody, RelayError> {
        let credential = self.credential()?;
        let query = query
            .filter(|q| !q.is_empty())
            .ok_or(RelayError::Validation(QUERY_REQUIRED))?;

        let upstream = self.api.search_movies(credential, query).await?;
        let body = success_body(upstream, SEARCH_ERROR)?;
        ensure_json(&body).context("failed to decode search response")?;
        Ok(JsonBody(body))
    }

    /// Fetches one movie and returns the upstream body verbatim.
    ///
    /// # Errors
    ///
    /// - [`RelayError::NotConfigured`] without a credential.
    /// - [`RelayError::MovieNotFound`] when TMDB answers 404.
    /// - [`RelayError::Upstream`] on any other non-success upstream status.
    /// - [`RelayError::Internal`] on transport failure or a body that is not
    ///   JSON.
    #[instrument(skip(self))]
    pub async fn movie_by_id(&self, movie_id: i64) -> Result<JsonBody, RelayError> {
        let credential = self.credential()?;
        let upstream = self.api.movie_details(credential, movie_id).await?;
        if upstream.status == StatusCode::NOT_FOUND {
            return Err(RelayError::MovieNotFound);
        }
        let body = success_body(upstream, MOVIE_ERROR)?;
        ensure_json(&body).context("failed to decode movie response")?;
        Ok(JsonBody(body))
    }
}

/// Returns the body of a 2xx response, or the status passed through with
/// the endpoint's fixed message.
fn success_body(upstream: UpstreamResponse, message: &'static str) -> Result<Bytes, RelayError> {
    if upstream.is_success() {
        Ok(upstream.body)
    } else {
        Err(RelayError::Upstream {
            status: upstream.status,
            message,
        })
    }
}

/// Checks that `body` is one well-formed JSON document without keeping any
/// of it; the caller still relays the original bytes.
fn ensure_json(body: &[u8]) -> serde_json::Result<()> {
    serde_json::from_slice::<IgnoredAny>(body).map(|_| ())
}

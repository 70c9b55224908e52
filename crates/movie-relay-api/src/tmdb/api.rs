//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{Credential, UpstreamResponse};

/// TMDB API trait.
///
/// Abstracts the upstream calls so the relay can be exercised against a fake.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// A non-success upstream status is not an error here: it is returned in
/// [`UpstreamResponse::status`] for the caller to map. Errors are reserved
/// for transport failures (connect, timeout, body read).
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches the `movie/popular` listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body cannot be read.
    async fn popular_movies(&self, credential: &Credential) -> Result<UpstreamResponse>;

    /// Searches movies by title via `search/movie`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body cannot be read.
    async fn search_movies(&self, credential: &Credential, query: &str)
    -> Result<UpstreamResponse>;

    /// Fetches a single movie via `movie/{movie_id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body cannot be read.
    async fn movie_details(&self, credential: &Credential, movie_id: i64)
    -> Result<UpstreamResponse>;
}

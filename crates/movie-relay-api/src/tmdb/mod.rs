//! TMDB API client module.
//!
//! Issues GET requests against the TMDB API v3 movie endpoints and hands
//! back the raw upstream status and body for the relay to translate.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{TmdbClient, TmdbClientBuilder};
pub use types::{Credential, MovieList, UpstreamResponse};

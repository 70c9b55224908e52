//! API client library for movie-relay.
//!
//! Provides the upstream TMDB client the relay forwards requests to.

/// TMDB API client.
pub mod tmdb;

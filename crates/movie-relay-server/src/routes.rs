//! HTTP surface: axum router, handlers, and middleware.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use movie_relay_api::tmdb::TmdbApi;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::RelayError;
use crate::relay::{JsonBody, MovieRelay};

/// Shared handler state.
#[derive(Debug)]
pub struct AppState<A> {
    relay: Arc<MovieRelay<A>>,
    expose_error_details: bool,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            relay: Arc::clone(&self.relay),
            expose_error_details: self.expose_error_details,
        }
    }
}

impl<A: TmdbApi> AppState<A> {
    /// Wraps a relay for sharing across handlers.
    pub fn new(relay: MovieRelay<A>, expose_error_details: bool) -> Self {
        Self {
            relay: Arc::new(relay),
            expose_error_details,
        }
    }

    fn respond(&self, result: Result<JsonBody, RelayError>) -> Response {
        match result {
            Ok(body) => body.into_response(),
            Err(err) => err.render(self.expose_error_details),
        }
    }
}

/// Query string of `GET /api/search`.
#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
}

/// Builds the application router.
pub fn build_router<A>(state: AppState<A>, cors_allow_any_origin: bool) -> Router
where
    A: TmdbApi + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/popular", get(popular_movies::<A>))
        .route("/api/search", get(search_movies::<A>))
        .route("/api/movie/{id}", get(movie_by_id::<A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any_origin {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn popular_movies<A>(State(state): State<AppState<A>>) -> Response
where
    A: TmdbApi + Send + Sync + 'static,
{
    let result = state.relay.popular_movies().await;
    state.respond(result)
}

async fn search_movies<A>(
    State(state): State<AppState<A>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    A: TmdbApi + Send + Sync + 'static,
{
    let result = state.relay.search_movies(params.query.as_deref()).await;
    state.respond(result)
}

async fn movie_by_id<A>(State(state): State<AppState<A>>, Path(id): Path<i64>) -> Response
where
    A: TmdbApi + Send + Sync + 'static,
{
    let result = state.relay.movie_by_id(id).await;
    state.respond(result)
}

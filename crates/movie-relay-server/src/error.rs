//! Relay error taxonomy and its HTTP rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body of a 500 when error details are hidden.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors a relay operation can end in. Each maps to exactly one response.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No TMDB API key was provided at startup.
    #[error("API key not configured")]
    NotConfigured,

    /// The caller omitted a required parameter.
    #[error("{0}")]
    Validation(&'static str),

    /// TMDB answered 404 for a by-id lookup.
    #[error("Movie not found")]
    MovieNotFound,

    /// TMDB answered with a non-success status; the status is passed through.
    #[error("{message}")]
    Upstream {
        /// Status returned by TMDB.
        status: StatusCode,
        /// Fixed per-endpoint message; never the upstream body.
        message: &'static str,
    },

    /// Transport failure or an unexpected upstream body.
    #[error("Internal server error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    /// Status code this error is reported with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MovieNotFound => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the error and renders it as a plain-text response.
    ///
    /// With `expose_details` off, a 500 carries only a generic message.
    pub fn render(&self, expose_details: bool) -> Response {
        match self {
            Self::NotConfigured => tracing::warn!("rejecting request: TMDB API key not configured"),
            Self::Validation(reason) => tracing::debug!(reason, "rejecting invalid request"),
            Self::MovieNotFound => tracing::debug!("TMDB reported movie not found"),
            Self::Upstream { status, message } => {
                tracing::warn!(%status, reason = message, "TMDB API returned an error status");
            }
            Self::Internal(err) => tracing::error!("relay failed: {err:#}"),
        }

        let body = match self {
            Self::Internal(_) if !expose_details => String::from(INTERNAL_ERROR_MESSAGE),
            _ => self.to_string(),
        };
        (self.status(), body).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.render(true)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use anyhow::anyhow;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        // Arrange & Act & Assert
        assert_eq!(RelayError::NotConfigured.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::Validation("Search query is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::MovieNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RelayError::Upstream {
                status: StatusCode::UNAUTHORIZED,
                message: "x",
            }
            .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RelayError::Internal(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_includes_context_chain() {
        // Arrange
        let err = RelayError::Internal(anyhow!("connection refused").context("request failed"));

        // Act
        let message = err.to_string();

        // Assert
        assert_eq!(
            message,
            "Internal server error: request failed: connection refused"
        );
    }

    #[tokio::test]
    async fn test_render_hides_internal_details() {
        // Arrange
        let err = RelayError::Internal(anyhow!("secret detail"));

        // Act
        let response = err.render(false);

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal server error");
    }

    #[tokio::test]
    async fn test_render_upstream_uses_fixed_message() {
        // Arrange
        let err = RelayError::Upstream {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Error fetching movies from TMDB API",
        };

        // Act
        let response = err.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_text(response).await,
            "Error fetching movies from TMDB API"
        );
    }
}

//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// API error response body
///
/// Upstream failures surface to the frontend as a single message; the
/// request ID logged alongside ties the response to the backend trace.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] common::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        // Log the error with request ID for backend tracing
        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(e) => match e {
                // Client errors (4xx)
                common::error::Error::ValidationError(_) => StatusCode::BAD_REQUEST,

                // Upstream/provider failures surface uniformly (5xx)
                common::error::Error::Transport(_)
                | common::error::Error::UpstreamHttp { .. }
                | common::error::Error::UpstreamSchema(_)
                | common::error::Error::Stream(_)
                | common::error::Error::Serialization(_)
                | common::error::Error::ConfigurationError(_)
                | common::error::Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use slurm_bridge_core::error::CoreError;
use slurm_bridge_core::slurm::CommandStatus;

/// Sentinel returncode for requests rejected before any process was spawned.
pub const RETURNCODE_NOT_RUN: i32 = -1;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation errors and adds HTTP-specific
/// variants. Implements [`IntoResponse`] so every failing handler path still
/// terminates in the standard JSON envelope rather than a bare connection
/// drop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A validation error from `slurm_bridge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A request body or argument that could not be decoded as declared.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Validation errors are detected before any process is spawned
            // and reported with their own message.
            AppError::Core(core) => (StatusCode::BAD_REQUEST, core.to_string()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = CommandStatus {
            response_message: String::new(),
            error_message: message,
            returncode: RETURNCODE_NOT_RUN,
        };

        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_bad_request() {
        let response =
            AppError::Core(CoreError::InvalidJobId("12a4".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let response = AppError::InternalError("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

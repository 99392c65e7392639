use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use jaycee_common::LendError;
use tracing::warn;

/// Maps the lending error taxonomy onto HTTP. Business-rule failures
/// surface their message verbatim; unexpected failures are logged and
/// collapsed into a generic 500.
pub struct ApiError(pub LendError);

impl From<LendError> for ApiError {
    fn from(e: LendError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LendError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            LendError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
            LendError::Forbidden(m) => (StatusCode::FORBIDDEN, m.clone()),
            LendError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            LendError::Conflict(m) => (StatusCode::BAD_REQUEST, m.clone()),
            LendError::DuplicateRepayment => (StatusCode::CONFLICT, self.0.to_string()),
            LendError::Upstream(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
            LendError::Database(e) => {
                warn!(error = %e, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            LendError::Other(e) => {
                warn!(error = %e, "Unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Shared shape for auth rejections built outside a handler body.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

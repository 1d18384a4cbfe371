use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::web::views;

/// Convenience type alias for handler return values.
pub type WebResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status for this error.
    ///
    /// - input and lifecycle problems map to 400
    /// - unknown record ids map to 404
    /// - everything else maps to 500 with a sanitized message
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidDate(_)
            | AppError::InvalidKind(_)
            | AppError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "An internal error occurred".to_string()
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };

        (status, views::error_page(&message)).into_response()
    }
}

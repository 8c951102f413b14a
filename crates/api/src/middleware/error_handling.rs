//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a `{"error": message}` JSON body,
//! so every endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::SlotError;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use slotbook_api::middleware::error_handling::AppError;
/// use slotbook_core::errors::SlotError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(SlotError::NotFound("Service not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub SlotError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SlotError::NotFound(_) => StatusCode::NOT_FOUND,
            SlotError::Validation(_) => StatusCode::BAD_REQUEST,
            SlotError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SlotError::Authorization(_) => StatusCode::FORBIDDEN,
            SlotError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Lets handlers use `?` on `SlotResult` values.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(err)
    }
}

/// Repository errors surface as `SlotError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SlotError::Database(err))
    }
}

/// Maps a SlotError straight to an HTTP response
pub fn map_error(err: SlotError) -> Response {
    AppError(err).into_response()
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
    #[error("Trade store error: {0}")]
    Store(#[from] trade_store::StoreError),
    #[error("Malformed request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Analytics(analytics_err) => {
                tracing::warn!(error = %analytics_err, "Rejected analytics input.");
                (StatusCode::UNPROCESSABLE_ENTITY, analytics_err.to_string())
            }
            AppError::Store(store_err) => {
                tracing::error!(error = ?store_err, "Trade store error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The trade snapshot could not be read".to_string(),
                )
            }
            AppError::BadRequest(message) => {
                tracing::warn!(error = %message, "Malformed request.");
                (StatusCode::UNPROCESSABLE_ENTITY, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

// HTTP mapping of generator errors
use crate::domain::error::GeneratorError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(pub GeneratorError);

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GeneratorError::UnknownChart(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        tracing::warn!("Rejected request ({}): {}", status, self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

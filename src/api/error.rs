use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Generation error: {0}")]
    Generation(#[source] anyhow::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            // The raw upstream error goes into the body as a diagnostic
            // convenience; it is not a stable contract.
            ApiError::Generation(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error", "error": format!("{error:#}") }),
            ),
            ApiError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Internal server error", "error": error.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Deserialize a request body the way the original schemas did: any shape
/// violation is a 400 with the offending detail.
pub fn parse_body<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|error| ApiError::InvalidRequest(format!("Invalid input: {error}")))
}

/// Map a hand-rolled validation failure to a 400.
pub fn invalid(error: anyhow::Error) -> ApiError {
    ApiError::InvalidRequest(error.to_string())
}

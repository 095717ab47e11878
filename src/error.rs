//! Error types surfaced to HTTP callers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors that end a request. Per-instance upstream failures never show up
/// here; they are folded into the fallback loop as `Outcome::Failure`.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Missing or empty query
    #[error("{0}")]
    Validation(String),

    /// Every engine/instance combination was tried without a usable answer
    #[error("All search instances are unavailable. Please try again later.")]
    AllInstancesUnavailable { query: String },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AllInstancesUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(message) => json!({ "error": message }),
            Self::AllInstancesUnavailable { query } => json!({
                "error": self.to_string(),
                "query": query,
                "number_of_results": 0,
                "results": [],
            }),
        };
        (status, Json(body)).into_response()
    }
}

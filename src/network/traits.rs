//! Instance client seam and request outcomes

use crate::results::RawSearchResult;
use crate::search::SearchQuery;
use async_trait::async_trait;
use thiserror::Error;

/// Why a single instance attempt produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Classified result of one search request against one instance
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// HTTP 200 with at least one result item
    Success(RawSearchResult),
    /// HTTP 200 with an empty, null or absent result list
    EmptySuccess,
    Failure(FailureReason),
}

impl Outcome {
    /// Classify a parsed 200 response body
    pub fn from_body(result: RawSearchResult) -> Self {
        let count = match result.get("results") {
            None | Some(serde_json::Value::Null) => Some(0),
            Some(serde_json::Value::Array(items)) => Some(items.len()),
            Some(_) => None,
        };

        match count {
            Some(0) => Outcome::EmptySuccess,
            Some(_) => Outcome::Success(result),
            None => Outcome::Failure(FailureReason::Malformed(
                "`results` is not an array".to_string(),
            )),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Issues one search request to one backend instance.
///
/// Implementations never return errors: every failure is classified into an
/// `Outcome` and handed back to the caller.
#[async_trait]
pub trait InstanceClient: Send + Sync {
    async fn try_instance(
        &self,
        base_url: &str,
        query: &SearchQuery,
        engine: &str,
        client_ip: &str,
    ) -> Outcome;
}

//! Client error types.
//!
//! Every failure out of the HTTP client is one of these variants, so callers
//! have a single error shape to handle. The client never retries and never
//! recovers internally.

use thiserror::Error;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur during an authenticated API call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable token at call time; raised before any network I/O.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The backend rejected the request with a non-2xx status.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response body that did not parse as the expected type.
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Build the backend-rejection variant, falling back to a generic message
    /// when the error body carried no detail.
    pub fn api(status: u16, detail: Option<String>) -> Self {
        Self::Api {
            status,
            detail: detail.unwrap_or_else(|| format!("HTTP error! status: {status}")),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated)
    }

    /// HTTP status of a backend rejection, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_uses_detail_when_present() {
        let err = ClientError::api(404, Some("Job not found".to_string()));
        assert_eq!(err.to_string(), "Job not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn api_error_falls_back_to_status_message() {
        let err = ClientError::api(500, None);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }
}

//! Error types for ComboCurve API calls
//!
//! Every request failure is surfaced as an [`ApiError`] wrapped in an
//! `anyhow::Error`. Callers that need to branch on the failure can
//! `downcast_ref::<ApiError>()`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

use super::query::Params;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed with status {status} (params: {params:?}): {body}")]
    Status {
        method: Method,
        url: String,
        params: Option<Params>,
        status: StatusCode,
        body: String,
    },

    #[error("{method} {url} could not be sent (params: {params:?})")]
    Transport {
        method: Method,
        url: String,
        params: Option<Params>,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned malformed JSON")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object or array of objects, got {kind}")]
    UnexpectedShape { kind: &'static str },

    #[error("Order key `{field}` not found in record with keys: {available:?}")]
    MissingSortKey { field: String, available: Vec<String> },

    #[error("Invalid econ model type: {given}. Valid types are: {}", .valid.join(", "))]
    InvalidModelType { given: String, valid: Vec<&'static str> },

    #[error("No record returned from {url}")]
    NotFound { url: String },

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl ApiError {
    /// HTTP status of the failing response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Method and URL of the request that failed
    pub fn request(&self) -> Option<(&Method, &str)> {
        match self {
            Self::Status { method, url, .. }
            | Self::Transport { method, url, .. }
            | Self::Decode { method, url, .. } => Some((method, url.as_str())),
            _ => None,
        }
    }
}

/// Short JSON type name used in shape errors
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_request_context() {
        let err = ApiError::Status {
            method: Method::GET,
            url: "https://api.combocurve.com/v1/projects".to_string(),
            params: Some(vec![("take".to_string(), "200".to_string())]),
            status: StatusCode::BAD_REQUEST,
            body: "bad".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("GET"));
        assert!(message.contains("https://api.combocurve.com/v1/projects"));
        assert!(message.contains("take"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            err.request(),
            Some((&Method::GET, "https://api.combocurve.com/v1/projects"))
        );
    }

    #[test]
    fn test_invalid_model_type_lists_valid_values() {
        let err = ApiError::InvalidModelType {
            given: "bogus".to_string(),
            valid: vec!["capex", "pricing"],
        };

        assert_eq!(
            err.to_string(),
            "Invalid econ model type: bogus. Valid types are: capex, pricing"
        );
    }
}

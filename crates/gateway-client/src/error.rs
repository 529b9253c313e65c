//! Error types for gateway-client.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when calling the planning service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Message suitable for showing to the user: the service's `detail` when
    /// it sent one, otherwise a description of the failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Status { status, .. } => format!("Request failed with status {}", status),
            Self::Http(err) if err.is_timeout() => "The request timed out".to_string(),
            Self::Http(err) if err.is_connect() => {
                "Could not reach the wellness service".to_string()
            }
            other => other.to_string(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Extract the `detail` field of an error body. String details are used as
/// they are; structured ones (validation error lists) are serialized.
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_user_message() {
        let err = GatewayError::Status {
            status: 400,
            detail: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.to_string(), "HTTP 400: Email already registered");
    }

    #[test]
    fn test_status_without_detail() {
        let err = GatewayError::Status {
            status: 502,
            detail: None,
        };
        assert_eq!(err.user_message(), "Request failed with status 502");
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "User not found"}"#).as_deref(),
            Some("User not found")
        );
        assert_eq!(
            error_detail(r#"{"detail": [{"loc": ["body", "age"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","age"]}]"#)
        );
        assert!(error_detail(r#"{"detail": null}"#).is_none());
        assert!(error_detail("<html>Bad Gateway</html>").is_none());
        assert!(error_detail(r#"{"error": "x"}"#).is_none());
    }
}

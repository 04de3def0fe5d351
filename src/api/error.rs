//! Error types for the JIRA client.

use thiserror::Error;

/// Errors that can occur when talking to the JIRA API.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Authentication failed - invalid username or password.
    #[error("JIRA authentication failed: check the configured username and password")]
    Unauthorized,

    /// Permission denied - the account lacks access to the resource.
    #[error("JIRA permission denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("JIRA resource not found: {0}")]
    NotFound(String),

    /// Rate limited by the JIRA API.
    #[error("JIRA rate limited the request")]
    RateLimited,

    /// JIRA server error.
    #[error("JIRA server error: {0}")]
    ServerError(String),

    /// JIRA rejected the request (bad JQL, invalid field value, ...).
    #[error("JIRA rejected the request: {0}")]
    Rejected(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed.
    #[error("invalid JIRA response: {0}")]
    InvalidResponse(String),
}

/// Result type for JIRA client operations.
pub type Result<T> = std::result::Result<T, JiraError>;

impl JiraError {
    /// Create an error from an HTTP status code and message context.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status.as_u16() {
            400 => JiraError::Rejected(context.to_string()),
            401 => JiraError::Unauthorized,
            403 => JiraError::Forbidden(context.to_string()),
            404 => JiraError::NotFound(context.to_string()),
            429 => JiraError::RateLimited,
            500..=599 => JiraError::ServerError(format!("HTTP {}: {}", status, context)),
            _ => JiraError::ServerError(format!("unexpected HTTP {}: {}", status, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_400() {
        let err = JiraError::from_status(StatusCode::BAD_REQUEST, "bad jql");
        match err {
            JiraError::Rejected(msg) => assert_eq!(msg, "bad jql"),
            _ => panic!("expected Rejected"),
        }
    }

    #[test]
    fn test_error_from_status_401() {
        let err = JiraError::from_status(StatusCode::UNAUTHORIZED, "test");
        assert!(matches!(err, JiraError::Unauthorized));
    }

    #[test]
    fn test_error_from_status_404() {
        let err = JiraError::from_status(StatusCode::NOT_FOUND, "issue PROJ-123");
        match err {
            JiraError::NotFound(msg) => assert_eq!(msg, "issue PROJ-123"),
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_error_from_status_429() {
        let err = JiraError::from_status(StatusCode::TOO_MANY_REQUESTS, "test");
        assert!(matches!(err, JiraError::RateLimited));
    }

    #[test]
    fn test_error_from_status_500() {
        let err = JiraError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "test");
        assert!(matches!(err, JiraError::ServerError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = JiraError::NotFound("PROJ-123".to_string());
        assert_eq!(err.to_string(), "JIRA resource not found: PROJ-123");
    }
}

//! Centralized error types for jirasheet.
//!
//! Every failure a request handler can hit converges on [`AppError`], which
//! carries the HTTP mapping: client mistakes answer 400, a search with no
//! matches 404, bad login 401, and upstream JIRA trouble 500 with the
//! upstream message embedded. Per-row bulk-update failures never reach this
//! type; they are tallied inside the driver and logged server-side only.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::JiraError;
use crate::query::QueryError;
use crate::sheet::SheetError;
use crate::update::UpdateError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request was missing or malformed input (400).
    #[error("{0}")]
    ClientInput(String),

    /// No issues matched the search criteria (404).
    #[error("{0}")]
    NotFound(String),

    /// Login failed or the session cookie is missing/stale (401).
    #[error("Invalid credentials")]
    Unauthorized,

    /// The query builder had nothing to build from (400).
    #[error("{0}")]
    Query(#[from] QueryError),

    /// The upload was rejected before any update call (400).
    #[error("{0}")]
    Update(#[from] UpdateError),

    /// Spreadsheet encoding/decoding failed (400 for uploads, 500 for
    /// exports).
    #[error("{0}")]
    Sheet(#[from] SheetError),

    /// The JIRA server was unreachable or rejected the request (500).
    #[error("JIRA error: {0}")]
    Jira(#[from] JiraError),
}

impl AppError {
    /// Convenience constructor for client input errors.
    pub fn client_input(msg: impl Into<String>) -> Self {
        AppError::ClientInput(msg.into())
    }

    /// The HTTP status this error answers with.
    fn status(&self) -> StatusCode {
        match self {
            AppError::ClientInput(_) | AppError::Query(_) | AppError::Update(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            // A workbook we failed to read is the client's problem; one we
            // failed to write is ours.
            AppError::Sheet(SheetError::Decode(_)) | AppError::Sheet(SheetError::NoWorksheet) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Sheet(SheetError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Jira(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error body: `{"message": "..."}` on every non-2xx response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, "{}", self);
        } else {
            warn!(%status, "{}", self);
        }

        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::ClientInput(format!("malformed multipart upload: {}", e))
    }
}

/// Result type for request handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_maps_to_400() {
        let err: AppError = QueryError::Empty.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "no search criteria provided");
    }

    #[test]
    fn test_insufficient_data_maps_to_400() {
        let err: AppError = UpdateError::InsufficientData.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::NotFound("No issues found matching the criteria".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_maps_to_401_with_generic_message() {
        let err = AppError::Unauthorized;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_jira_error_maps_to_500_and_embeds_message() {
        let err: AppError = JiraError::ServerError("HTTP 503: down".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("HTTP 503: down"));
    }

    #[test]
    fn test_sheet_decode_is_client_fault() {
        let err: AppError = SheetError::NoWorksheet.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}

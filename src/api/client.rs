//! JIRA API client implementation.
//!
//! One client instance is built at startup from the process configuration and
//! shared read-only across requests. Every operation is a single attempt:
//! the tool reports upstream failures to the caller instead of retrying, and
//! the bulk-update path counts them per row.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use serde_json::json;
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{JiraError, Result};
use super::types::{CurrentUser, SearchResult};
use crate::config::JiraConfig;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Hard cap on the number of issues one search may return.
const MAX_SEARCH_RESULTS: u32 = 1000;

/// The JIRA API client.
///
/// Provides async methods for the two operations this tool needs: a JQL
/// search with an explicit field-id list, and a single-field issue update.
#[derive(Debug, Clone)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the JIRA instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl JiraClient {
    /// Create a new JIRA client from configuration.
    ///
    /// Does not touch the network; use [`Self::current_user`] to probe the
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let auth = Auth::new(&config.username, &config.password);
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(JiraError::Network)?;
        let base_url = normalize_base_url(&config.base_url);
        debug!(%base_url, username = %auth.username(), "jira client ready");

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Get the current authenticated user.
    ///
    /// Calls `GET /rest/api/2/myself`; used at startup to verify that the
    /// instance is reachable and the credentials are valid.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let url = format!("{}/rest/api/2/myself", self.base_url);
        self.get(&url).await
    }

    /// Search for issues using JQL.
    ///
    /// # Arguments
    ///
    /// * `jql` - The JQL query string
    /// * `start_at` - The index of the first issue to return (0-based)
    /// * `max_results` - Result cap (limited to 1000)
    /// * `fields` - The JIRA field identifiers to include in each issue
    #[instrument(skip(self, fields), fields(jql = %jql))]
    pub async fn search_issues(
        &self,
        jql: &str,
        start_at: u32,
        max_results: u32,
        fields: &[String],
    ) -> Result<SearchResult> {
        debug!(start_at, max_results, "searching issues");

        let url = format!(
            "{}/rest/api/2/search?jql={}&startAt={}&maxResults={}&fields={}",
            self.base_url,
            urlencoding::encode(jql),
            start_at,
            max_results.min(MAX_SEARCH_RESULTS),
            fields.join(","),
        );

        let result: SearchResult = self.get(&url).await?;
        debug!(found = result.issues.len(), total = result.total, "search complete");
        Ok(result)
    }

    /// Set a single field on an issue.
    ///
    /// Calls `PUT /rest/api/2/issue/{key}` with `{"fields": {field_id: value}}`.
    /// JIRA answers 204 with no body on success.
    #[instrument(skip(self, value), fields(issue_key = %key, field_id = %field_id))]
    pub async fn update_issue_field(&self, key: &str, field_id: &str, value: &str) -> Result<()> {
        debug!("updating issue field");

        let url = format!("{}/rest/api/2/issue/{}", self.base_url, key);
        let body = json!({ "fields": { field_id: value } });

        let response = self
            .client
            .put(&url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!(%status, body = %error_body, "update rejected");
            Err(error_from_response(status, &url, &error_body))
        }
    }

    /// Perform a GET request with authentication and error handling.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| JiraError::InvalidResponse(format!("failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!(%status, body = %error_body, "error response");
            Err(error_from_response(status, &url, &error_body))
        }
    }

}

/// Create an appropriate error from an HTTP response.
///
/// JIRA usually reports failures as JSON with `errorMessages` and/or a
/// per-field `errors` object; fold those into the error context when present.
fn error_from_response(status: StatusCode, url: &str, body: &str) -> JiraError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(arr) = json.get("errorMessages").and_then(|m| m.as_array()) {
            if !arr.is_empty() {
                let context = arr
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return JiraError::from_status(status, &context);
            }
        }
        if let Some(obj) = json.get("errors").and_then(|e| e.as_object()) {
            if !obj.is_empty() {
                let context = obj
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                return JiraError::from_status(status, &context);
            }
        }
    }

    let context = if body.is_empty() { url } else { body };
    JiraError::from_status(status, context)
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("JIRA URL does not use HTTPS: {}", url);
    }

    url.to_string()
}

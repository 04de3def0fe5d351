//! JIRA API request and response types.
//!
//! These types model the JIRA REST API v2 responses for search results and
//! issues. Field values are kept as raw JSON: the export path decides how to
//! interpret each one through the field catalog, so the client does not
//! commit to a schema for custom fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The current authenticated user.
///
/// Returned by `GET /rest/api/2/myself`. Only the fields the startup probe
/// logs are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// The user's display name.
    pub display_name: String,
    /// The user's login name (self-hosted JIRA).
    #[serde(default)]
    pub name: String,
}

/// Search result from a JQL query.
///
/// Returned by `GET /rest/api/2/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// The index of the first result.
    pub start_at: u32,
    /// Maximum results requested.
    pub max_results: u32,
    /// Total number of matching issues.
    pub total: u32,
    /// The list of issues.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl SearchResult {
    /// Check if the server holds more matches than this page returned.
    pub fn has_more(&self) -> bool {
        self.start_at + (self.issues.len() as u32) < self.total
    }
}

/// A JIRA issue.
///
/// Returned as part of search results. The `fields` map is keyed by JIRA
/// field identifier (`summary`, `status`, `customfield_10500`, ...) and owned
/// by the client for the duration of one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    /// Raw field values, keyed by JIRA field identifier.
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Issue {
    /// Look up a raw field value by JIRA field identifier.
    ///
    /// JIRA serializes absent fields as explicit `null`; those are reported
    /// as missing here so callers only ever see real values.
    pub fn field(&self, jira_key: &str) -> Option<&Value> {
        self.fields.get(jira_key).filter(|v| !v.is_null())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

//! JQL assembly from per-request filter criteria.

use serde::Deserialize;
use thiserror::Error;

/// Errors from query construction.
#[derive(Debug, Error)]
pub enum QueryError {
    /// No filter field and no custom override were supplied.
    ///
    /// This is a client error (the request carried nothing to search by),
    /// not a server fault.
    #[error("no search criteria provided")]
    Empty,
}

/// Filter criteria for one export request.
///
/// All fields are optional; the set is constructed from one incoming request,
/// consumed once, and discarded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterSet {
    /// Issue type filter (maps to the `issuetype` JQL field).
    #[serde(rename = "type", alias = "issueType")]
    pub issue_type: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Labels filter.
    pub labels: Option<String>,
    /// Fix version filter.
    #[serde(rename = "fixVersion")]
    pub fix_version: Option<String>,
    /// Project filter.
    pub project: Option<String>,
    /// Assignee filter.
    pub assignee: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Raw JQL override for advanced users.
    ///
    /// When present and non-empty it is used verbatim and every other filter
    /// is ignored. No validation is performed; a malformed override surfaces
    /// only as whatever error the JIRA server returns.
    #[serde(rename = "customJQL")]
    pub custom_jql: Option<String>,
}

impl FilterSet {
    /// Build the JQL query string for this filter set.
    ///
    /// Each present filter becomes an equality clause `field = "value"`,
    /// joined with `AND` in a fixed priority order: type, status, labels,
    /// fixVersion, project, assignee, priority. The order is stable
    /// regardless of which fields are absent.
    ///
    /// Values are interpolated without escaping, so a value containing a
    /// double quote corrupts the query syntax. Known edge case, kept for
    /// compatibility with the queries the tool has always produced.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Empty`] when no filter and no override is set.
    pub fn to_jql(&self) -> Result<String, QueryError> {
        if let Some(jql) = self.custom_jql.as_deref() {
            if !jql.is_empty() {
                return Ok(jql.to_string());
            }
        }

        let mut clauses = Vec::new();
        for (field, value) in [
            ("issuetype", &self.issue_type),
            ("status", &self.status),
            ("labels", &self.labels),
            ("fixVersion", &self.fix_version),
            ("project", &self.project),
            ("assignee", &self.assignee),
            ("priority", &self.priority),
        ] {
            if let Some(value) = value.as_deref() {
                if !value.is_empty() {
                    clauses.push(format!("{} = \"{}\"", field, value));
                }
            }
        }

        if clauses.is_empty() {
            return Err(QueryError::Empty);
        }

        Ok(clauses.join(" AND "))
    }
}

//! Issue flattening: one JIRA issue record becomes one spreadsheet row.
//!
//! Flattening is a pure function of the issue and the selected UI fields and
//! never fails: every extraction has a documented fallback, so a sparse or
//! oddly-shaped issue still produces a complete row.

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::Issue;
use crate::catalog::{self, FieldKind};

/// One spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Text cell.
    Text(String),
    /// Numeric cell (numeric custom fields pass through as numbers).
    Number(f64),
}

impl Cell {
    /// The empty text cell, the default for absent values.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// Cell content as a string, used for column sizing.
    pub fn as_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// Flatten one issue into an export row.
///
/// Cell 0 is always the issue key; the remaining cells follow `ui_fields` in
/// order, matching the headers the projector generates for the same list.
pub fn flatten(issue: &Issue, ui_fields: &[String]) -> Vec<Cell> {
    let mut row = Vec::with_capacity(ui_fields.len() + 1);
    row.push(Cell::Text(issue.key.clone()));
    for ui_key in ui_fields {
        row.push(extract(issue, ui_key));
    }
    row
}

/// Extract one field value according to its catalog kind.
///
/// Fields the catalog does not know are looked up directly under the UI key
/// in the issue's field mapping and stringified.
fn extract(issue: &Issue, ui_key: &str) -> Cell {
    match catalog::resolve(ui_key) {
        Some(descriptor) => {
            let raw = issue.field(descriptor.jira_key);
            extract_kind(raw, descriptor.kind)
        }
        None => issue.field(ui_key).map(scalar_cell).unwrap_or_else(Cell::empty),
    }
}

fn extract_kind(raw: Option<&Value>, kind: FieldKind) -> Cell {
    let Some(value) = raw else {
        // The assignee column is the one field whose absence reads
        // "Unassigned" instead of blank.
        return match kind {
            FieldKind::PersonObject => Cell::from("Unassigned"),
            _ => Cell::empty(),
        };
    };

    match kind {
        FieldKind::Text => value.as_str().map(Cell::from).unwrap_or_else(Cell::empty),
        FieldKind::NameObject => nested_str(value, "name"),
        FieldKind::PersonObject => match value.get("displayName").and_then(Value::as_str) {
            Some(name) => Cell::from(name),
            None => Cell::from("Unassigned"),
        },
        FieldKind::Date => value
            .as_str()
            .map(|s| Cell::Text(format_date(s)))
            .unwrap_or_else(Cell::empty),
        FieldKind::List => match value.as_array() {
            Some(items) => Cell::Text(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            None => Cell::empty(),
        },
        FieldKind::NamedList => match value.as_array() {
            Some(items) => Cell::Text(
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            None => Cell::empty(),
        },
        FieldKind::CustomValue => match value.get("value") {
            Some(inner) => scalar_cell(inner),
            None if value.is_object() => Cell::empty(),
            None => scalar_cell(value),
        },
        FieldKind::Numeric => match value.as_f64() {
            Some(n) => Cell::Number(n),
            None => scalar_cell(value),
        },
    }
}

fn nested_str(value: &Value, key: &str) -> Cell {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(Cell::from)
        .unwrap_or_else(Cell::empty)
}

/// Best-effort scalar rendering for values with no dedicated extraction rule.
fn scalar_cell(value: &Value) -> Cell {
    match value {
        Value::String(s) => Cell::Text(s.clone()),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or_else(Cell::empty),
        Value::Bool(b) => Cell::Text(b.to_string()),
        Value::Null => Cell::empty(),
        other => Cell::Text(other.to_string()),
    }
}

/// Render an ISO-8601 timestamp (or plain date) as `YYYY-MM-DD`.
///
/// JIRA timestamps look like `2024-01-15T10:30:00.000+0000` and custom date
/// fields like `2024-01-15`; both open with the calendar date. Anything that
/// doesn't passes through unchanged rather than turning into an artifact.
fn format_date(raw: &str) -> String {
    match raw.get(..10) {
        Some(prefix) if NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok() => {
            prefix.to_string()
        }
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(fields: Value) -> Issue {
        serde_json::from_value(json!({ "key": "PROJ-7", "fields": fields })).unwrap()
    }

    fn ui(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_row_starts_with_issue_key() {
        let row = flatten(&issue(json!({})), &ui(&["summary"]));
        assert_eq!(row[0], Cell::from("PROJ-7"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_text_field() {
        let row = flatten(&issue(json!({"summary": "Fix login"})), &ui(&["summary"]));
        assert_eq!(row[1], Cell::from("Fix login"));
    }

    #[test]
    fn test_name_object_field() {
        let row = flatten(
            &issue(json!({"status": {"id": "3", "name": "In Progress"}})),
            &ui(&["status"]),
        );
        assert_eq!(row[1], Cell::from("In Progress"));
    }

    #[test]
    fn test_assignee_present() {
        let row = flatten(
            &issue(json!({"assignee": {"displayName": "Dana Storm"}})),
            &ui(&["assignee"]),
        );
        assert_eq!(row[1], Cell::from("Dana Storm"));
    }

    #[test]
    fn test_missing_assignee_is_unassigned_but_other_fields_blank() {
        let row = flatten(&issue(json!({})), &ui(&["assignee", "summary", "status"]));
        assert_eq!(row[1], Cell::from("Unassigned"));
        assert_eq!(row[2], Cell::empty());
        assert_eq!(row[3], Cell::empty());
    }

    #[test]
    fn test_date_field_formats_timestamp() {
        let row = flatten(
            &issue(json!({"created": "2024-01-15T10:30:00.000+0000"})),
            &ui(&["created"]),
        );
        assert_eq!(row[1], Cell::from("2024-01-15"));
    }

    #[test]
    fn test_custom_date_field_plain_date() {
        let row = flatten(
            &issue(json!({"customfield_13602": "2024-03-01"})),
            &ui(&["groomingDeadline"]),
        );
        assert_eq!(row[1], Cell::from("2024-03-01"));
    }

    #[test]
    fn test_unparseable_date_passes_through() {
        let row = flatten(&issue(json!({"created": "soonish"})), &ui(&["created"]));
        assert_eq!(row[1], Cell::from("soonish"));
    }

    #[test]
    fn test_labels_joined() {
        let row = flatten(
            &issue(json!({"labels": ["backend", "urgent"]})),
            &ui(&["labels"]),
        );
        assert_eq!(row[1], Cell::from("backend, urgent"));
    }

    #[test]
    fn test_empty_labels() {
        let row = flatten(&issue(json!({"labels": []})), &ui(&["labels"]));
        assert_eq!(row[1], Cell::empty());
    }

    #[test]
    fn test_fix_versions_joined_by_name() {
        let row = flatten(
            &issue(json!({"fixVersions": [{"name": "v1"}, {"name": "v2"}]})),
            &ui(&["fixVersions"]),
        );
        assert_eq!(row[1], Cell::from("v1, v2"));
    }

    #[test]
    fn test_custom_value_object_unwraps_value() {
        let row = flatten(
            &issue(json!({"customfield_10500": {"id": "1", "value": "M"}})),
            &ui(&["T-shirt size"]),
        );
        assert_eq!(row[1], Cell::from("M"));
    }

    #[test]
    fn test_custom_value_scalar_passes_through() {
        let row = flatten(
            &issue(json!({"customfield_10500": "L"})),
            &ui(&["T-shirt size"]),
        );
        assert_eq!(row[1], Cell::from("L"));
    }

    #[test]
    fn test_numeric_custom_field() {
        let row = flatten(&issue(json!({"customfield_13603": 5.5})), &ui(&["BAEffort"]));
        assert_eq!(row[1], Cell::Number(5.5));
    }

    #[test]
    fn test_unknown_field_direct_lookup() {
        let row = flatten(
            &issue(json!({"customfield_999": "raw value"})),
            &ui(&["customfield_999"]),
        );
        assert_eq!(row[1], Cell::from("raw value"));
    }

    #[test]
    fn test_unknown_field_absent_is_blank() {
        let row = flatten(&issue(json!({})), &ui(&["customfield_999"]));
        assert_eq!(row[1], Cell::empty());
    }

    #[test]
    fn test_cell_display_trims_integral_numbers() {
        assert_eq!(Cell::Number(5.0).to_string(), "5");
        assert_eq!(Cell::Number(5.5).to_string(), "5.5");
    }
}

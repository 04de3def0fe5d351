//! Field projection: from the UI field selection to the JIRA request field
//! list and the spreadsheet header row.
//!
//! Both projections prepend the issue key column, so for any selection the
//! request list, the header row, and every flattened data row line up
//! position for position.

use crate::catalog;

/// Default export selection when a request omits the field list.
pub const DEFAULT_FIELDS: &[&str] = &[
    "summary", "status", "assignee", "priority", "created", "updated",
];

/// Normalize the caller's field selection.
///
/// The issue key column is always implicit, so any `key` entries are
/// stripped; a missing or empty selection falls back to [`DEFAULT_FIELDS`].
pub fn selected_fields(requested: Option<Vec<String>>) -> Vec<String> {
    let fields: Vec<String> = requested
        .unwrap_or_default()
        .into_iter()
        .filter(|f| f != "key")
        .collect();

    if fields.is_empty() {
        DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
    } else {
        fields
    }
}

/// The JIRA field identifiers to request from the search API.
///
/// Prepends `key` exactly once, then maps every UI field through the catalog
/// (unknown fields pass through unchanged).
pub fn request_fields(ui_fields: &[String]) -> Vec<String> {
    let mut fields = Vec::with_capacity(ui_fields.len() + 1);
    fields.push("key".to_string());
    for ui_key in ui_fields {
        fields.push(catalog::jira_key_for(ui_key).to_string());
    }
    fields
}

/// The ordered column headers for the export, starting with `Issue Key`.
pub fn headers(ui_fields: &[String]) -> Vec<String> {
    let mut headers = Vec::with_capacity(ui_fields.len() + 1);
    headers.push("Issue Key".to_string());
    for ui_key in ui_fields {
        headers.push(catalog::label_for(ui_key).to_string());
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_projections_have_matching_length_and_order() {
        let ui = fields(&["summary", "status", "T-shirt size", "customfield_42"]);
        let request = request_fields(&ui);
        let headers = headers(&ui);

        assert_eq!(request.len(), 1 + ui.len());
        assert_eq!(headers.len(), request.len());
        assert_eq!(request[0], "key");
        assert_eq!(headers[0], "Issue Key");
    }

    #[test]
    fn test_request_fields_map_through_catalog() {
        let ui = fields(&["T-shirt size", "groomingDeadline"]);
        assert_eq!(
            request_fields(&ui),
            fields(&["key", "customfield_10500", "customfield_13602"])
        );
    }

    #[test]
    fn test_headers_fall_back_to_raw_ui_field() {
        let ui = fields(&["summary", "customfield_42"]);
        assert_eq!(headers(&ui), fields(&["Issue Key", "Summary", "customfield_42"]));
    }

    #[test]
    fn test_selected_fields_strips_key() {
        let selection = selected_fields(Some(fields(&["key", "summary", "status"])));
        assert_eq!(selection, fields(&["summary", "status"]));
    }

    #[test]
    fn test_selected_fields_defaults_when_missing() {
        assert_eq!(selected_fields(None), fields(DEFAULT_FIELDS));
    }

    #[test]
    fn test_selected_fields_defaults_when_only_key() {
        // Stripping `key` can empty the list; the default selection applies.
        assert_eq!(selected_fields(Some(fields(&["key"]))), fields(DEFAULT_FIELDS));
    }

    #[test]
    fn test_key_is_prepended_exactly_once() {
        let ui = selected_fields(Some(fields(&["key", "summary"])));
        let request = request_fields(&ui);
        assert_eq!(request.iter().filter(|f| *f == "key").count(), 1);
    }
}

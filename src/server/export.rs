//! The export endpoint: filters in, xlsx attachment out.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::session::Session;
use super::state::AppState;
use crate::error::{AppError, Result};
use crate::query::FilterSet;
use crate::{flatten, project, sheet};

/// Result cap for one export search.
const MAX_EXPORT_RESULTS: u32 = 1000;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Export request body: filter criteria plus the field selection.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(flatten)]
    pub filters: FilterSet,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

/// POST /api/export
///
/// Builds the JQL query and field projection, runs one search, flattens the
/// matches in result order, and answers with the workbook as an attachment.
#[instrument(skip_all)]
pub async fn export(
    State(state): State<AppState>,
    _session: Session,
    Json(request): Json<ExportRequest>,
) -> Result<Response> {
    let jql = request.filters.to_jql()?;
    info!(%jql, "export requested");

    let ui_fields = project::selected_fields(request.fields);
    let request_fields = project::request_fields(&ui_fields);

    let result = state
        .jira()
        .search_issues(&jql, 0, MAX_EXPORT_RESULTS, &request_fields)
        .await?;

    if result.issues.is_empty() {
        return Err(AppError::NotFound(
            "No issues found matching the criteria".to_string(),
        ));
    }
    if result.has_more() {
        warn!(
            total = result.total,
            exported = result.issues.len(),
            cap = result.max_results,
            "search matched more issues than the export cap"
        );
    }

    let headers = project::headers(&ui_fields);
    let rows: Vec<_> = result
        .issues
        .iter()
        .map(|issue| flatten::flatten(issue, &ui_fields))
        .collect();

    let bytes = sheet::encode_workbook(&headers, &rows)?;
    let filename = export_filename(Utc::now());
    info!(issues = rows.len(), %filename, "export complete");

    let response_headers = [
        (header::CONTENT_TYPE, XLSX_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((response_headers, bytes).into_response())
}

/// The attachment filename for an export taken at `now`: the UTC timestamp
/// with colons and periods replaced by dashes, truncated to 19 characters.
fn export_filename(now: DateTime<Utc>) -> String {
    format!("jira-export-{}.xlsx", now.format("%Y-%m-%dT%H-%M-%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_filename_format() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            export_filename(instant),
            "jira-export-2025-01-02T03-04-05.xlsx"
        );
    }

    #[test]
    fn test_export_filename_timestamp_is_19_chars() {
        let instant = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let name = export_filename(instant);
        let stamp = name
            .strip_prefix("jira-export-")
            .and_then(|s| s.strip_suffix(".xlsx"))
            .unwrap();
        assert_eq!(stamp.len(), 19);
        assert!(!stamp.contains(':'));
        assert!(!stamp.contains('.'));
    }

    #[test]
    fn test_export_request_accepts_filters_and_fields() {
        let request: ExportRequest = serde_json::from_str(
            r#"{"status": "Open", "fields": ["summary", "T-shirt size"]}"#,
        )
        .unwrap();
        assert_eq!(request.filters.status.as_deref(), Some("Open"));
        assert_eq!(
            request.fields.as_deref(),
            Some(&["summary".to_string(), "T-shirt size".to_string()][..])
        );
    }
}

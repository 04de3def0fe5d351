//! The bulk update endpoint: multipart upload in, update tally out.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{info, instrument};

use super::session::Session;
use super::state::AppState;
use crate::error::{AppError, Result};
use crate::update as bulk;
use crate::{catalog, sheet};

/// Response body: a message plus the aggregate counts.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: bulk::UpdateSummary,
}

/// POST /api/update
///
/// Expects multipart parts `jiraField` (the field to set, UI key or literal
/// JIRA identifier) and `file` (the uploaded workbook, column A issue keys,
/// column B new values, row 0 header). Drives one update call per usable row
/// and reports the tally; per-row failures never fail the request.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    _session: Session,
    mut multipart: Multipart,
) -> Result<Json<UpdateResponse>> {
    let mut jira_field: Option<String> = None;
    let mut file: Option<Bytes> = None;

    while let Some(part) = multipart.next_field().await? {
        let name = part.name().map(str::to_string);
        match name.as_deref() {
            Some("jiraField") => jira_field = Some(part.text().await?),
            Some("file") => file = Some(part.bytes().await?),
            _ => {}
        }
    }

    let jira_field = jira_field
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::client_input("No JIRA field selected"))?;
    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::client_input("No file uploaded or file is empty"))?;

    let field_id = catalog::jira_key_for(&jira_field).to_string();
    info!(%jira_field, %field_id, bytes = file.len(), "bulk update requested");

    let grid = sheet::decode_workbook(&file)?;

    let jira = state.jira().clone();
    let summary = bulk::run(&grid, &field_id, |row| {
        let jira = jira.clone();
        let field_id = field_id.clone();
        async move {
            jira.update_issue_field(&row.issue_key, &field_id, &row.new_value)
                .await
        }
    })
    .await?;

    info!(
        total = summary.total_rows,
        updated = summary.updated,
        failed = summary.failed,
        "bulk update complete"
    );

    Ok(Json(UpdateResponse {
        message: "Finished updating JIRA tickets.",
        summary,
    }))
}

//! The bulk update driver: walks an uploaded grid row by row and applies one
//! field update per usable row.
//!
//! Rows are strictly sequential, each awaited before the next, so the
//! success/failure tally needs no synchronization and the JIRA server never
//! sees a burst. Every row gets at most one attempt, and a failing row never
//! stops the rest of the batch.

use std::future::Future;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::error::Result as JiraResult;

/// Errors rejecting the whole batch before any update call.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The grid has no data rows (a header row alone is not a batch).
    #[error("spreadsheet must contain at least 2 rows (header + data)")]
    InsufficientData,
}

/// One actionable data row: issue key in column A, new value in column B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRow {
    /// The issue to update.
    pub issue_key: String,
    /// The new field value.
    pub new_value: String,
}

impl UpdateRow {
    /// Parse one data row, requiring both cells to be non-empty after
    /// trimming. Rows that fail here are skipped without an API call.
    pub fn parse(cells: &[String]) -> Option<Self> {
        let issue_key = cells.first()?.trim();
        let new_value = cells.get(1)?.trim();
        if issue_key.is_empty() || new_value.is_empty() {
            return None;
        }
        Some(Self {
            issue_key: issue_key.to_string(),
            new_value: new_value.to_string(),
        })
    }
}

/// Aggregate outcome of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    /// Data rows in the upload (header excluded), whatever their outcome.
    pub total_rows: usize,
    /// Rows whose update call succeeded.
    pub updated: usize,
    /// Rows skipped for missing cells plus rows whose update call failed.
    pub failed: usize,
}

/// Run the batch: validate each data row and apply the update callback once
/// per valid row.
///
/// `grid` is the decoded upload including the header row. `apply` receives
/// the parsed row and performs the actual field update; the driver logs each
/// failure and keeps going, so the returned summary always covers every row.
///
/// # Errors
///
/// Returns [`UpdateError::InsufficientData`] when the grid has fewer than
/// two rows. Per-row failures are never an error, only a count.
pub async fn run<F, Fut>(
    grid: &[Vec<String>],
    target_field: &str,
    mut apply: F,
) -> Result<UpdateSummary, UpdateError>
where
    F: FnMut(UpdateRow) -> Fut,
    Fut: Future<Output = JiraResult<()>>,
{
    if grid.len() < 2 {
        return Err(UpdateError::InsufficientData);
    }

    let mut updated = 0;
    let mut failed = 0;

    for (index, cells) in grid.iter().enumerate().skip(1) {
        let Some(row) = UpdateRow::parse(cells) else {
            warn!(row = index + 1, "skipping row: missing issue key or value");
            failed += 1;
            continue;
        };

        match apply(row.clone()).await {
            Ok(()) => {
                info!(issue_key = %row.issue_key, field = %target_field, "issue updated");
                updated += 1;
            }
            Err(e) => {
                error!(issue_key = %row.issue_key, field = %target_field, error = %e, "update failed");
                failed += 1;
            }
        }
    }

    Ok(UpdateSummary {
        total_rows: grid.len() - 1,
        updated,
        failed,
    })
}

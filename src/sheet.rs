//! Spreadsheet codec: xlsx encoding for exports and decoding for uploads.
//!
//! The rest of the tool only ever sees rectangular grids; this module is the
//! single place that knows which crates speak the file format.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use thiserror::Error;
use tracing::debug;

use crate::flatten::Cell;

/// The worksheet name used for exports.
const SHEET_NAME: &str = "JIRA Issues";

/// Column width bounds (in character units) for the auto-sizing clamp.
const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 50;

/// Errors from spreadsheet encoding/decoding.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to produce the workbook.
    #[error("failed to write spreadsheet: {0}")]
    Encode(#[from] rust_xlsxwriter::XlsxError),

    /// The uploaded bytes are not a readable workbook.
    #[error("failed to read spreadsheet: {0}")]
    Decode(#[from] calamine::XlsxError),

    /// The uploaded workbook has no worksheets.
    #[error("spreadsheet contains no worksheets")]
    NoWorksheet,
}

/// Serialize a header row plus data rows into xlsx bytes.
///
/// Columns are auto-sized from the data (see [`column_widths`]); this is
/// cosmetic only and has no bearing on the cell values.
pub fn encode_workbook(headers: &[String], rows: &[Vec<Cell>]) -> Result<Vec<u8>, SheetError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_index = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => worksheet.write_string(row_index, col as u16, text)?,
                Cell::Number(n) => worksheet.write_number(row_index, col as u16, *n)?,
            };
        }
    }

    for (col, width) in column_widths(headers, rows).into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(rows = rows.len(), bytes = bytes.len(), "workbook encoded");
    Ok(bytes)
}

/// Parse uploaded xlsx bytes into a rectangular grid of cell strings.
///
/// Reads the first worksheet; row 0 is the header. Empty cells become empty
/// strings, and numeric cells with no fractional part render without a
/// trailing `.0` so issue keys and plain values survive the trip.
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, SheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    debug!(rows = grid.len(), "workbook decoded");
    Ok(grid)
}

fn cell_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Column widths for the export: `clamp(longest cell + 2, 10, 50)` per
/// column, measuring the header row as well.
pub fn column_widths(headers: &[String], rows: &[Vec<Cell>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let mut longest = header.chars().count();
            for row in rows {
                if let Some(cell) = row.get(col) {
                    longest = longest.max(cell.as_text().chars().count());
                }
            }
            (longest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

//! Decoding `.xlsx`/`.xls` uploads into a [`Workbook`] of string rows.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use pricelist_core::{RawRow, Workbook};

use crate::error::WorkbookError;

/// `true` for file names ending in `.xlsx` or `.xls`, case-insensitively.
#[must_use]
pub fn is_supported_workbook_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

/// Decodes an in-memory workbook, format auto-detected.
///
/// # Errors
///
/// Returns [`WorkbookError::Decode`] if the bytes are not a readable
/// workbook, or [`WorkbookError::Sheet`] if a sheet cannot be read.
pub fn decode_workbook(bytes: Vec<u8>) -> Result<Workbook, WorkbookError> {
    let sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    read_sheets(sheets)
}

/// Reads a workbook file from disk.
///
/// # Errors
///
/// Returns [`WorkbookError::UnsupportedFormat`] for other extensions,
/// [`WorkbookError::Io`] if the file cannot be opened, and the
/// [`decode_workbook`] errors otherwise.
pub fn open_workbook_path(path: &Path) -> Result<Workbook, WorkbookError> {
    let name = path.to_string_lossy();
    if !is_supported_workbook_name(&name) {
        return Err(WorkbookError::UnsupportedFormat(name.into_owned()));
    }
    let sheets = open_workbook_auto(path)?;
    read_sheets(sheets)
}

/// Every sheet, every row, no header. Cells before the first used column
/// are restored as empty strings so the name/unit/price positions hold.
fn read_sheets<RS: Read + Seek>(mut sheets: Sheets<RS>) -> Result<Workbook, WorkbookError> {
    let mut workbook = Workbook::default();

    for name in sheets.sheet_names() {
        let range = sheets
            .worksheet_range(&name)
            .map_err(|e| WorkbookError::Sheet {
                sheet: name.clone(),
                reason: e.to_string(),
            })?;

        let leading = range
            .start()
            .map_or(0, |(_, col)| usize::try_from(col).unwrap_or(0));

        let rows = range.rows().map(|cells| {
            let padding = std::iter::repeat_n(String::new(), leading);
            RawRow {
                cells: padding.chain(cells.iter().map(cell_to_string)).collect(),
            }
        });
        workbook.push_sheet(name.clone(), rows);
    }

    Ok(workbook)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

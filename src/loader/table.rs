//! Raw table reading.
//!
//! Spreadsheets (XLSX, XLSM, XLSB, XLS, ODS) are read through `calamine`,
//! CSV files through `csv`. Either way the result is a [`RawTable`] of
//! untrimmed text cells; interpretation happens in the roster module.

use std::io;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{PayrollError, PayrollResult};

/// A header row plus data rows, every cell as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the first row.
    pub headers: Vec<String>,
    /// Remaining rows. Rows may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from string slices.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }
}

/// Reads the table at `path`, picking the reader from the file extension.
///
/// # Returns
///
/// Returns the table, or an error if:
/// - The file does not exist (`FileNotFound`)
/// - The file cannot be opened or parsed (`DataLoad`)
pub fn read_table(path: &Path) -> PayrollResult<RawTable> {
    if !path.exists() {
        return Err(PayrollError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv(path)
    } else {
        read_spreadsheet(path)
    }
}

fn load_error(path: &Path, message: impl ToString) -> PayrollError {
    PayrollError::DataLoad {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn read_csv(path: &Path) -> PayrollResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok(RawTable { headers, rows })
}

fn csv_error(path: &Path, error: csv::Error) -> PayrollError {
    if let csv::ErrorKind::Io(io_error) = error.kind() {
        if io_error.kind() == io::ErrorKind::NotFound {
            return PayrollError::FileNotFound {
                path: path.display().to_string(),
            };
        }
    }
    load_error(path, error)
}

fn read_spreadsheet(path: &Path) -> PayrollResult<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|e| load_error(path, e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| load_error(path, "workbook contains no worksheets"))?
        .map_err(|e| load_error(path, e))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    let headers = rows.next().unwrap_or_default();
    Ok(RawTable {
        headers,
        rows: rows.collect(),
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

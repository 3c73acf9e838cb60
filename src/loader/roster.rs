//! Roster validation.
//!
//! Turns a [`RawTable`] into validated [`EmployeeRecord`]s: repairs the
//! `Allowances` header, checks the required columns, and parses each row.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{PayrollError, PayrollResult};
use crate::models::EmployeeRecord;

use super::table::{RawTable, read_table};

/// Header of the employee identifier column.
pub const COL_EMPLOYEE_ID: &str = "Employee ID";
/// Header of the employee name column.
pub const COL_NAME: &str = "Name";
/// Header of the email address column.
pub const COL_EMAIL: &str = "Email";
/// Header of the basic salary column.
pub const COL_BASIC_SALARY: &str = "Basic Salary";
/// Header of the allowances column.
pub const COL_ALLOWANCES: &str = "Allowances";
/// Header of the deductions column.
pub const COL_DEDUCTIONS: &str = "Deductions";

/// Columns every roster must contain.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_EMPLOYEE_ID,
    COL_NAME,
    COL_EMAIL,
    COL_BASIC_SALARY,
    COL_ALLOWANCES,
    COL_DEDUCTIONS,
];

/// Loads and validates employee rosters.
///
/// # Example
///
/// ```no_run
/// use payslip_dispatch::loader::RosterLoader;
///
/// let records = RosterLoader::load("employees.xlsx")?;
/// println!("Loaded {} employees", records.len());
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterLoader;

impl RosterLoader {
    /// Reads the roster at `path` and returns its records in file order.
    ///
    /// # Returns
    ///
    /// Returns the records, or an error if:
    /// - The file does not exist (`FileNotFound`)
    /// - The file cannot be read or parsed (`DataLoad`)
    /// - Required columns are absent (`MissingColumns`)
    /// - A row has an empty or non-numeric value, or a repeated identifier
    ///   (`InvalidRecord`)
    /// - There are no data rows (`EmptyRoster`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Vec<EmployeeRecord>> {
        let path = path.as_ref();
        let table = read_table(path)?;
        info!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = ?table.headers,
            "Employee data loaded"
        );
        Self::from_table(table, &path.display().to_string())
    }

    /// Validates an already-read table. `source` names it in errors.
    pub fn from_table(mut table: RawTable, source: &str) -> PayrollResult<Vec<EmployeeRecord>> {
        if let Some(original) = normalize_headers(&mut table.headers) {
            debug!(
                from = %original,
                to = COL_ALLOWANCES,
                "Renamed column to canonical name"
            );
        }

        let columns = ColumnIndex::resolve(&table.headers)?;

        let mut records = Vec::with_capacity(table.rows.len());
        let mut seen_ids = HashSet::new();

        for (offset, row) in table.rows.iter().enumerate() {
            // Header is row 1.
            let row_number = offset + 2;
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let record = columns.parse_row(row, row_number)?;
            if !seen_ids.insert(record.employee_id.clone()) {
                return Err(PayrollError::InvalidRecord {
                    row: row_number,
                    field: COL_EMPLOYEE_ID.to_string(),
                    message: format!("duplicate identifier '{}'", record.employee_id),
                });
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(PayrollError::EmptyRoster {
                path: source.to_string(),
            });
        }

        Ok(records)
    }
}

/// Renames a case or whitespace variant of `Allowances` to the canonical
/// header. Only the first matching header is considered.
///
/// Returns the original header if a rename happened.
pub fn normalize_headers(headers: &mut [String]) -> Option<String> {
    let expected = COL_ALLOWANCES.to_lowercase();
    let found = headers
        .iter_mut()
        .find(|header| header.trim().to_lowercase() == expected)?;

    if found.as_str() == COL_ALLOWANCES {
        return None;
    }
    Some(std::mem::replace(found, COL_ALLOWANCES.to_string()))
}

/// Returns the required columns absent from `headers`, sorted.
pub fn missing_columns(headers: &[String]) -> Vec<String> {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(**column))
        .map(|column| column.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    employee_id: usize,
    name: usize,
    email: usize,
    basic_salary: usize,
    allowances: usize,
    deductions: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> PayrollResult<Self> {
        let missing = missing_columns(headers);
        if !missing.is_empty() {
            return Err(PayrollError::MissingColumns { missing });
        }

        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| PayrollError::MissingColumns {
                    missing: vec![name.to_string()],
                })
        };

        Ok(Self {
            employee_id: position(COL_EMPLOYEE_ID)?,
            name: position(COL_NAME)?,
            email: position(COL_EMAIL)?,
            basic_salary: position(COL_BASIC_SALARY)?,
            allowances: position(COL_ALLOWANCES)?,
            deductions: position(COL_DEDUCTIONS)?,
        })
    }

    fn parse_row(&self, row: &[String], row_number: usize) -> PayrollResult<EmployeeRecord> {
        let cell = |index: usize| row.get(index).map(|value| value.trim()).unwrap_or("");

        let text = |index: usize, field: &str| -> PayrollResult<String> {
            let value = cell(index);
            if value.is_empty() {
                return Err(PayrollError::InvalidRecord {
                    row: row_number,
                    field: field.to_string(),
                    message: "value is empty".to_string(),
                });
            }
            Ok(value.to_string())
        };

        let amount = |index: usize, field: &str| -> PayrollResult<Decimal> {
            parse_decimal(cell(index)).map_err(|message| PayrollError::InvalidRecord {
                row: row_number,
                field: field.to_string(),
                message,
            })
        };

        Ok(EmployeeRecord {
            employee_id: text(self.employee_id, COL_EMPLOYEE_ID)?,
            name: text(self.name, COL_NAME)?,
            email: text(self.email, COL_EMAIL)?,
            basic_salary: amount(self.basic_salary, COL_BASIC_SALARY)?,
            allowances: amount(self.allowances, COL_ALLOWANCES)?,
            deductions: amount(self.deductions, COL_DEDUCTIONS)?,
        })
    }
}

fn parse_decimal(value: &str) -> Result<Decimal, String> {
    if value.is_empty() {
        return Err("value is empty".to_string());
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| format!("'{}' is not a number", value))
}

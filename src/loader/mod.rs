//! Employee roster loading.
//!
//! This module reads the input table and turns it into validated
//! [`EmployeeRecord`](crate::models::EmployeeRecord)s. Any failure here is
//! fatal to the run: without records there is nothing to process.

mod roster;
mod table;

pub use roster::{
    COL_ALLOWANCES, COL_BASIC_SALARY, COL_DEDUCTIONS, COL_EMAIL, COL_EMPLOYEE_ID, COL_NAME,
    REQUIRED_COLUMNS, RosterLoader, missing_columns, normalize_headers,
};
pub use table::{RawTable, read_table};

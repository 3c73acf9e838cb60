//! Payslip document rendering.
//!
//! This module builds the payslip layout for an employee and writes it as a
//! PDF document keyed by the employee identifier.

mod layout;
mod pdf;

use std::path::PathBuf;

use crate::error::PayrollResult;
use crate::models::EmployeeRecord;

pub use layout::{LayoutLine, PayslipLayout, SALARY_DETAILS_HEADING};
pub use pdf::{PAYSLIP_EXTENSION, PdfRenderer};

/// Produces a payslip document for one employee.
pub trait DocumentRenderer {
    /// Writes the payslip for `record` and returns its path.
    ///
    /// An existing document at the same path is overwritten. Failures are
    /// reported as [`PayrollError::Render`](crate::error::PayrollError::Render).
    fn render(&self, record: &EmployeeRecord) -> PayrollResult<PathBuf>;
}

//! Employee record model.
//!
//! This module defines the [`EmployeeRecord`] struct, one validated row of
//! the input roster.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's pay components for the current run.
///
/// Records are built once by the roster loader and never mutated
/// afterwards. The identifier doubles as the payslip file name key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// The address the payslip is delivered to.
    pub email: String,
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Total allowances for the period.
    pub allowances: Decimal,
    /// Total deductions for the period.
    pub deductions: Decimal,
}

impl EmployeeRecord {
    /// Returns the base name used for this employee's payslip file.
    ///
    /// # Examples
    ///
    /// ```
    /// use payslip_dispatch::models::EmployeeRecord;
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord {
    ///     employee_id: "E001".to_string(),
    ///     name: "Jane Doe".to_string(),
    ///     email: "jane@example.com".to_string(),
    ///     basic_salary: Decimal::new(100000, 2),
    ///     allowances: Decimal::ZERO,
    ///     deductions: Decimal::ZERO,
    /// };
    /// assert_eq!(record.document_name("pdf"), "E001.pdf");
    /// ```
    pub fn document_name(&self, extension: &str) -> String {
        format!("{}.{}", self.employee_id, extension)
    }
}

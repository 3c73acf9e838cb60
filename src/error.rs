//! Error types for payslip dispatch.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading a roster, rendering a
//! payslip or delivering it.

use thiserror::Error;

/// The main error type for payslip dispatch.
///
/// Loader and configuration errors abort a run. Calculation, render,
/// delivery and attachment errors are scoped to a single employee and are
/// recovered by the batch processor.
///
/// # Example
///
/// ```
/// use payslip_dispatch::error::PayrollError;
///
/// let error = PayrollError::FileNotFound {
///     path: "employees.xlsx".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee data file not found: employees.xlsx");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The roster file does not exist.
    #[error("Employee data file not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The roster file exists but could not be read or parsed.
    #[error("Error loading employee data from '{path}': {message}")]
    DataLoad {
        /// The path of the roster file.
        path: String,
        /// A description of the underlying failure.
        message: String,
    },

    /// The roster header lacks one or more required columns.
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        /// The missing column names, sorted.
        missing: Vec<String>,
    },

    /// A roster row holds an empty or malformed value.
    #[error("Invalid value in row {row}, column '{field}': {message}")]
    InvalidRecord {
        /// The 1-based row number in the source table (header is row 1).
        row: usize,
        /// The column holding the bad value.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The roster has a header but no employee rows.
    #[error("No employee records found in '{path}'")]
    EmptyRoster {
        /// The path of the roster file.
        path: String,
    },

    /// A payslip document could not be written.
    #[error("Failed to render payslip '{path}': {message}")]
    Render {
        /// The target document path.
        path: String,
        /// A description of the write failure.
        message: String,
    },

    /// The payslip email could not be delivered.
    #[error("Failed to send email to {recipient}: {message}")]
    Delivery {
        /// The destination address.
        recipient: String,
        /// The transport's diagnostic.
        message: String,
    },

    /// An employee's pay could not be calculated.
    #[error("Cannot calculate pay for employee {employee_id}: {message}")]
    Calculation {
        /// The employee identifier.
        employee_id: String,
        /// A description of the failure.
        message: String,
    },

    /// The payslip document could not be read for attaching.
    #[error("Failed to attach payslip '{path}': {message}")]
    Attachment {
        /// The document path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// A required setting was not provided.
    #[error("Missing required setting: {key}")]
    MissingSetting {
        /// The environment variable or settings key.
        key: String,
    },

    /// A setting was provided but could not be interpreted.
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The environment variable or settings key.
        key: String,
        /// A description of the problem.
        message: String,
    },
}

impl PayrollError {
    /// Returns true for errors that should abort the whole run rather than
    /// a single employee's processing.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PayrollError::Calculation { .. }
                | PayrollError::Render { .. }
                | PayrollError::Delivery { .. }
                | PayrollError::Attachment { .. }
        )
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_displays_path() {
        let error = PayrollError::FileNotFound {
            path: "/missing/employees.xlsx".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee data file not found: /missing/employees.xlsx"
        );
    }

    #[test]
    fn test_missing_columns_lists_names() {
        let error = PayrollError::MissingColumns {
            missing: vec!["Deductions".to_string(), "Email".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required columns: Deductions, Email"
        );
    }

    #[test]
    fn test_invalid_record_displays_row_and_field() {
        let error = PayrollError::InvalidRecord {
            row: 3,
            field: "Basic Salary".to_string(),
            message: "'abc' is not a number".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value in row 3, column 'Basic Salary': 'abc' is not a number"
        );
    }

    #[test]
    fn test_delivery_error_displays_recipient() {
        let error = PayrollError::Delivery {
            recipient: "jane@example.com".to_string(),
            message: "535 authentication failed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to send email to jane@example.com: 535 authentication failed"
        );
    }

    #[test]
    fn test_missing_setting_displays_key() {
        let error = PayrollError::MissingSetting {
            key: "SENDER_PASSWORD".to_string(),
        };
        assert_eq!(error.to_string(), "Missing required setting: SENDER_PASSWORD");
    }

    #[test]
    fn test_per_record_errors_are_not_fatal() {
        let render = PayrollError::Render {
            path: "payslips/E1.pdf".to_string(),
            message: "permission denied".to_string(),
        };
        let attachment = PayrollError::Attachment {
            path: "payslips/E1.pdf".to_string(),
            message: "not found".to_string(),
        };
        let calculation = PayrollError::Calculation {
            employee_id: "E1".to_string(),
            message: "net pay is out of range".to_string(),
        };
        assert!(!render.is_fatal());
        assert!(!attachment.is_fatal());
        assert!(!calculation.is_fatal());
    }

    #[test]
    fn test_load_errors_are_fatal() {
        let error = PayrollError::MissingColumns {
            missing: vec!["Deductions".to_string()],
        };
        assert!(error.is_fatal());
        assert!(PayrollError::EmptyRoster {
            path: "x.csv".to_string()
        }
        .is_fatal());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_file_not_found() -> PayrollResult<()> {
            Err(PayrollError::FileNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_file_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

//! Core data models for payslip dispatch.
//!
//! This module contains the domain models shared by the loader, renderer,
//! delivery service and batch processor.

mod batch_report;
mod employee;

pub use batch_report::{BatchReport, OutcomeStatus, RecordOutcome};
pub use employee::EmployeeRecord;

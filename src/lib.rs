//! Payslip generation and delivery.
//!
//! This crate loads an employee roster from a spreadsheet or CSV file,
//! computes each employee's net pay, renders a one-page PDF payslip per
//! employee and emails it to them, one employee at a time.

#![warn(missing_docs)]

pub mod batch;
pub mod calculation;
pub mod config;
pub mod delivery;
pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod render;

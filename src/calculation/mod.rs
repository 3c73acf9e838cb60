//! Calculation logic for payslip dispatch.
//!
//! This module contains the net pay calculation and the currency formatting
//! used when amounts are displayed on a payslip.

mod money;
mod net_pay;

pub use money::{DISPLAY_DECIMAL_PLACES, format_amount};
pub use net_pay::net_pay;

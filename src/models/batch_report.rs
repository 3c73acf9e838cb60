//! Batch run result models.
//!
//! This module contains the [`BatchReport`] type and the per-employee
//! [`RecordOutcome`] entries collected while a roster is processed.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The final state of one employee's processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// The payslip was rendered and delivered.
    Delivered {
        /// Where the payslip was written.
        document: PathBuf,
    },
    /// The payslip could not be rendered; delivery was not attempted.
    RenderFailed {
        /// The rendering error message.
        error: String,
    },
    /// The payslip was rendered but could not be delivered.
    DeliveryFailed {
        /// Where the payslip was written.
        document: PathBuf,
        /// The delivery error message.
        error: String,
    },
}

/// The outcome of processing a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// The employee's identifier.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// What happened to this employee's payslip.
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl RecordOutcome {
    /// Returns true if the payslip reached the transport successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.status, OutcomeStatus::Delivered { .. })
    }
}

/// Aggregate result of one batch run.
///
/// # Example
///
/// ```
/// use payslip_dispatch::models::BatchReport;
///
/// let report = BatchReport::new();
/// assert_eq!(report.summary(), "0/0 processed");
/// assert!(!report.success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique identifier for this run, attached to log events.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// One entry per processed record, in roster order.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Creates an empty report for a new run.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            outcomes: Vec::new(),
        }
    }

    /// Appends one record's outcome.
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of records attempted.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of records rendered and delivered.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Outcomes that did not end in delivery.
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when at least one record was processed and every one succeeded.
    pub fn success(&self) -> bool {
        self.total() > 0 && self.succeeded() == self.total()
    }

    /// Human-readable tally, e.g. `2/3 processed`.
    pub fn summary(&self) -> String {
        format!("{}/{} processed", self.succeeded(), self.total())
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

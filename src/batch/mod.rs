//! Batch processing of an employee roster.
//!
//! The [`BatchProcessor`] renders and delivers one payslip per record,
//! strictly in roster order. A failure for one employee is logged and
//! recorded, and processing moves on to the next employee.

use tracing::{error, info};

use crate::delivery::Mailer;
use crate::models::{BatchReport, EmployeeRecord, OutcomeStatus, RecordOutcome};
use crate::render::DocumentRenderer;

/// Drives render-then-deliver over every record.
///
/// # Example
///
/// ```no_run
/// use payslip_dispatch::batch::BatchProcessor;
/// use payslip_dispatch::config::SettingsLoader;
/// use payslip_dispatch::delivery::{DeliveryService, SmtpMailer};
/// use payslip_dispatch::loader::RosterLoader;
/// use payslip_dispatch::render::PdfRenderer;
///
/// let settings = SettingsLoader::load(None)?;
/// let records = RosterLoader::load("employees.xlsx")?;
/// let processor = BatchProcessor::new(
///     PdfRenderer::new(&settings.payslip),
///     DeliveryService::new(
///         SmtpMailer::from_settings(&settings.smtp)?,
///         &settings.payslip.organization,
///     ),
/// );
///
/// let report = processor.process_all(&records);
/// println!("{}", report.summary());
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BatchProcessor<R, M> {
    renderer: R,
    mailer: M,
}

impl<R: DocumentRenderer, M: Mailer> BatchProcessor<R, M> {
    /// Creates a processor from a renderer and a mailer.
    pub fn new(renderer: R, mailer: M) -> Self {
        Self { renderer, mailer }
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the mailer.
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Processes every record in order and returns the run's report.
    ///
    /// An empty slice is treated as a failed run: nothing is attempted and
    /// the report's [`success`](BatchReport::success) is false.
    pub fn process_all(&self, records: &[EmployeeRecord]) -> BatchReport {
        let mut report = BatchReport::new();

        if records.is_empty() {
            error!(run_id = %report.run_id, "Employee data not loaded; nothing to process");
            return report;
        }

        info!(run_id = %report.run_id, total = records.len(), "Starting payslip run");

        for record in records {
            report.record(self.process_record(record));
        }

        info!(
            run_id = %report.run_id,
            succeeded = report.succeeded(),
            total = report.total(),
            "Batch finished: {}",
            report.summary()
        );
        report
    }

    /// Renders and delivers a single payslip.
    fn process_record(&self, record: &EmployeeRecord) -> RecordOutcome {
        info!(
            employee_id = %record.employee_id,
            name = %record.name,
            "Processing employee"
        );

        let status = match self.renderer.render(record) {
            Err(err) => {
                error!(
                    "Error processing employee {} (ID: {}): {}",
                    record.name, record.employee_id, err
                );
                OutcomeStatus::RenderFailed {
                    error: err.to_string(),
                }
            }
            Ok(document) => {
                info!(employee_id = %record.employee_id, path = %document.display(), "Payslip generated");
                match self.mailer.send_payslip(&record.email, &document) {
                    Ok(()) => OutcomeStatus::Delivered { document },
                    Err(err) => {
                        error!(
                            "Error processing employee {} (ID: {}): {}",
                            record.name, record.employee_id, err
                        );
                        OutcomeStatus::DeliveryFailed {
                            document,
                            error: err.to_string(),
                        }
                    }
                }
            }
        };

        RecordOutcome {
            employee_id: record.employee_id.clone(),
            name: record.name.clone(),
            status,
        }
    }
}

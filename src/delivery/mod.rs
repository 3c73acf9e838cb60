//! Payslip delivery by email.
//!
//! [`DeliveryService`] composes the payslip email and hands it to a
//! [`MailTransport`]. The production transport is [`SmtpMailer`]; tests
//! substitute their own.

mod message;
mod smtp;

use std::path::Path;

use tracing::info;

use crate::error::PayrollResult;

pub use message::{
    ATTACHMENT_CONTENT_TYPE, ATTACHMENT_PREFIX, PAYSLIP_SUBJECT, PayslipEmail, body_text,
};
pub use smtp::SmtpMailer;

/// Moves a composed email to its recipient. One call is one attempt.
pub trait MailTransport {
    /// Sends `email`, returning `Delivery` on any transport failure.
    fn deliver(&self, email: &PayslipEmail) -> PayrollResult<()>;
}

/// Sends a rendered payslip to an employee.
pub trait Mailer {
    /// Delivers the document at `document` to `recipient`.
    fn send_payslip(&self, recipient: &str, document: &Path) -> PayrollResult<()>;
}

/// Composes payslip emails and sends them through a transport.
///
/// # Example
///
/// ```no_run
/// use payslip_dispatch::config::SettingsLoader;
/// use payslip_dispatch::delivery::{DeliveryService, Mailer, SmtpMailer};
/// use std::path::Path;
///
/// let settings = SettingsLoader::load(None)?;
/// let mailer = SmtpMailer::from_settings(&settings.smtp)?;
/// let service = DeliveryService::new(mailer, &settings.payslip.organization);
/// service.send_payslip("jane@example.com", Path::new("payslips/E001.pdf"))?;
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryService<T> {
    transport: T,
    organization: String,
}

impl<T: MailTransport> DeliveryService<T> {
    /// Creates a service signing emails on behalf of `organization`.
    pub fn new(transport: T, organization: &str) -> Self {
        Self {
            transport,
            organization: organization.to_string(),
        }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: MailTransport> Mailer for DeliveryService<T> {
    fn send_payslip(&self, recipient: &str, document: &Path) -> PayrollResult<()> {
        let email = PayslipEmail::compose(recipient, document, &self.organization)?;
        self.transport.deliver(&email)?;
        info!(recipient = %recipient, attachment = %email.attachment_name, "Email sent successfully");
        Ok(())
    }
}

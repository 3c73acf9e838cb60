//! SMTP transport.
//!
//! Sends payslip emails through an authenticated STARTTLS relay with
//! `lettre`. Every send opens its own session and closes it afterwards.

use std::time::Duration;

use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::{ENV_SENDER_EMAIL, ENV_SENDER_PASSWORD, SmtpSettings};
use crate::error::{PayrollError, PayrollResult};

use super::MailTransport;
use super::message::{ATTACHMENT_CONTENT_TYPE, PayslipEmail};

/// Delivers payslip emails over SMTP.
#[derive(Clone)]
pub struct SmtpMailer {
    server: String,
    port: u16,
    sender: Mailbox,
    credentials: Credentials,
    timeout: Duration,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("sender", &self.sender.to_string())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Creates a mailer from the SMTP settings.
    ///
    /// # Returns
    ///
    /// Returns the mailer, or an error if:
    /// - The sender address or password is absent (`MissingSetting`)
    /// - The sender address does not parse (`InvalidSetting`)
    pub fn from_settings(settings: &SmtpSettings) -> PayrollResult<Self> {
        let sender_email = settings
            .sender_email
            .clone()
            .ok_or_else(|| PayrollError::MissingSetting {
                key: ENV_SENDER_EMAIL.to_string(),
            })?;
        let password = settings
            .sender_password
            .clone()
            .ok_or_else(|| PayrollError::MissingSetting {
                key: ENV_SENDER_PASSWORD.to_string(),
            })?;

        let sender: Mailbox =
            sender_email
                .parse()
                .map_err(|e: AddressError| PayrollError::InvalidSetting {
                    key: ENV_SENDER_EMAIL.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            server: settings.server.clone(),
            port: settings.port,
            sender,
            credentials: Credentials::new(sender_email, password),
            timeout: settings.timeout(),
        })
    }

    /// Builds the MIME message: plain-text body plus the PDF attachment.
    pub fn build_message(&self, email: &PayslipEmail) -> PayrollResult<Message> {
        let delivery_error = |message: String| PayrollError::Delivery {
            recipient: email.recipient.clone(),
            message,
        };

        let recipient: Mailbox = email
            .recipient
            .parse()
            .map_err(|e: AddressError| delivery_error(format!("invalid recipient address: {}", e)))?;

        let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
            .map_err(|e| delivery_error(e.to_string()))?;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(email.body.clone()))
                    .singlepart(
                        Attachment::new(email.attachment_name.clone())
                            .body(email.attachment.clone(), content_type),
                    ),
            )
            .map_err(|e| delivery_error(e.to_string()))
    }

    fn connect(&self, recipient: &str) -> PayrollResult<SmtpTransport> {
        let transport = SmtpTransport::starttls_relay(&self.server)
            .map_err(|e| PayrollError::Delivery {
                recipient: recipient.to_string(),
                message: e.to_string(),
            })?
            .port(self.port)
            .credentials(self.credentials.clone())
            .timeout(Some(self.timeout))
            .build();
        Ok(transport)
    }
}

impl MailTransport for SmtpMailer {
    fn deliver(&self, email: &PayslipEmail) -> PayrollResult<()> {
        let message = self.build_message(email)?;
        let transport = self.connect(&email.recipient)?;

        transport
            .send(&message)
            .map(|_| ())
            .map_err(|e| PayrollError::Delivery {
                recipient: email.recipient.clone(),
                message: format!("SMTP error: {}", e),
            })
    }
}

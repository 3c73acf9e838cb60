//! Payslip email composition.

use std::fs;
use std::path::Path;

use crate::error::{PayrollError, PayrollResult};

/// Subject line of every payslip email.
pub const PAYSLIP_SUBJECT: &str = "Your Payslip for This Month";

/// Prefix of the attachment file name shown to the recipient.
pub const ATTACHMENT_PREFIX: &str = "payslip_";

/// MIME type of the attached document.
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/pdf";

/// A composed payslip email, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipEmail {
    /// Destination address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// File name presented in the content disposition.
    pub attachment_name: String,
    /// Document bytes.
    pub attachment: Vec<u8>,
}

impl PayslipEmail {
    /// Composes the email for `recipient`, reading the document at `document`.
    ///
    /// # Returns
    ///
    /// Returns the email, or `Attachment` if the document cannot be read.
    pub fn compose(recipient: &str, document: &Path, organization: &str) -> PayrollResult<Self> {
        let attachment_error = |message: String| PayrollError::Attachment {
            path: document.display().to_string(),
            message,
        };

        let stem = document
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| attachment_error("document path has no file name".to_string()))?;

        let attachment = fs::read(document).map_err(|e| attachment_error(e.to_string()))?;

        Ok(Self {
            recipient: recipient.to_string(),
            subject: PAYSLIP_SUBJECT.to_string(),
            body: body_text(organization),
            attachment_name: format!("{}{}.pdf", ATTACHMENT_PREFIX, stem),
            attachment,
        })
    }
}

/// The fixed plain-text body, signed by the organization's HR department.
pub fn body_text(organization: &str) -> String {
    format!(
        "Dear Employee,\n\n\
         Please find attached your payslip for this month.\n\n\
         Best regards,\n\
         {} HR Department\n",
        organization
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_reads_document_and_names_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("E001.pdf");
        fs::write(&document, b"%PDF-1.3 test").unwrap();

        let email = PayslipEmail::compose("jane@example.com", &document, "Uncommon.org").unwrap();

        assert_eq!(email.recipient, "jane@example.com");
        assert_eq!(email.subject, "Your Payslip for This Month");
        assert_eq!(email.attachment_name, "payslip_E001.pdf");
        assert_eq!(email.attachment, b"%PDF-1.3 test".to_vec());
    }

    #[test]
    fn test_compose_missing_document_is_attachment_error() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("missing.pdf");

        let result = PayslipEmail::compose("jane@example.com", &document, "Uncommon.org");

        match result {
            Err(PayrollError::Attachment { path, .. }) => {
                assert!(path.ends_with("missing.pdf"));
            }
            other => panic!("Expected Attachment error, got {:?}", other),
        }
    }

    #[test]
    fn test_body_is_signed_by_organization() {
        let body = body_text("Example Ltd");

        assert!(body.starts_with("Dear Employee,\n\n"));
        assert!(body.contains("Please find attached your payslip for this month."));
        assert!(body.ends_with("Best regards,\nExample Ltd HR Department\n"));
    }
}

//! Configuration types for payslip dispatch.
//!
//! This module contains the strongly-typed settings structures that are
//! deserialized from an optional YAML file and then overridden from the
//! environment. Every field has a default so a partial file is valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Mail server connection and sender credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmtpSettings {
    /// The SMTP relay host.
    pub server: String,
    /// The SMTP submission port (STARTTLS).
    pub port: u16,
    /// The address payslips are sent from; also the login user.
    pub sender_email: Option<String>,
    /// The sender's SMTP password or app token.
    pub sender_password: Option<String>,
    /// Upper bound on a single send, in seconds.
    pub timeout_secs: u64,
}

impl SmtpSettings {
    /// Returns the per-send timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            server: "smtp.gmail.com".to_string(),
            port: 587,
            sender_email: None,
            sender_password: None,
            timeout_secs: 30,
        }
    }
}

/// Payslip output and branding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayslipSettings {
    /// Directory payslip documents are written to.
    pub output_dir: PathBuf,
    /// Organization name shown in the payslip title and email signature.
    pub organization: String,
    /// Symbol printed before every amount.
    pub currency_symbol: String,
    /// Append-only error log.
    pub log_file: PathBuf,
}

impl Default for PayslipSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("payslips"),
            organization: "Uncommon.org".to_string(),
            currency_symbol: "$".to_string(),
            log_file: PathBuf::from("payslip_generator.log"),
        }
    }
}

/// Complete runtime configuration.
///
/// Built once at start-up and passed by reference into each component's
/// constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mail server settings.
    pub smtp: SmtpSettings,
    /// Payslip output settings.
    pub payslip: PayslipSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let settings = Settings::default();

        assert_eq!(settings.smtp.server, "smtp.gmail.com");
        assert_eq!(settings.smtp.port, 587);
        assert_eq!(settings.smtp.sender_email, None);
        assert_eq!(settings.smtp.timeout(), Duration::from_secs(30));
        assert_eq!(settings.payslip.output_dir, PathBuf::from("payslips"));
        assert_eq!(settings.payslip.currency_symbol, "$");
        assert_eq!(
            settings.payslip.log_file,
            PathBuf::from("payslip_generator.log")
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
smtp:
  server: mail.example.com
payslip:
  organization: Example Ltd
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.smtp.server, "mail.example.com");
        assert_eq!(settings.smtp.port, 587);
        assert_eq!(settings.payslip.organization, "Example Ltd");
        assert_eq!(settings.payslip.output_dir, PathBuf::from("payslips"));
    }
}

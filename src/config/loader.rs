//! Configuration loading functionality.
//!
//! This module provides the [`SettingsLoader`] type which reads an optional
//! YAML settings file and layers environment variables on top of it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PayrollError, PayrollResult};

use super::types::Settings;

/// Environment variable holding the SMTP relay host.
pub const ENV_SMTP_SERVER: &str = "SMTP_SERVER";
/// Environment variable holding the SMTP port.
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
/// Environment variable holding the sender address.
pub const ENV_SENDER_EMAIL: &str = "SENDER_EMAIL";
/// Environment variable holding the sender password.
pub const ENV_SENDER_PASSWORD: &str = "SENDER_PASSWORD";
/// Environment variable holding the per-send timeout in seconds.
pub const ENV_SMTP_TIMEOUT_SECS: &str = "SMTP_TIMEOUT_SECS";
/// Environment variable holding the payslip output directory.
pub const ENV_OUTPUT_DIR: &str = "PAYSLIP_OUTPUT_DIR";
/// Environment variable holding the organization name.
pub const ENV_ORGANIZATION: &str = "PAYSLIP_ORGANIZATION";
/// Environment variable holding the currency symbol.
pub const ENV_CURRENCY: &str = "PAYSLIP_CURRENCY";
/// Environment variable holding the error log path.
pub const ENV_LOG_FILE: &str = "PAYSLIP_LOG_FILE";

/// Loads [`Settings`] from a YAML file and the process environment.
///
/// Precedence, lowest first: built-in defaults, the YAML file (if given),
/// environment variables.
///
/// # Example
///
/// ```no_run
/// use payslip_dispatch::config::SettingsLoader;
///
/// let settings = SettingsLoader::load(None)?;
/// println!("Sending through {}:{}", settings.smtp.server, settings.smtp.port);
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads settings from an optional YAML file, then applies environment
    /// overrides from the current process.
    ///
    /// # Returns
    ///
    /// Returns the merged settings, or an error if:
    /// - The YAML file is missing or malformed (`InvalidSetting`)
    /// - A numeric environment variable does not parse (`InvalidSetting`)
    pub fn load(path: Option<&Path>) -> PayrollResult<Settings> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`SettingsLoader::load`], reading variables through `lookup`
    /// instead of the process environment.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> PayrollResult<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match path {
            Some(path) => Self::load_yaml(path)?,
            None => Settings::default(),
        };
        Self::apply_env(&mut settings, lookup)?;
        Ok(settings)
    }

    /// Loads and parses a YAML settings file.
    fn load_yaml(path: &Path) -> PayrollResult<Settings> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| PayrollError::InvalidSetting {
            key: path_str.clone(),
            message: format!("cannot read settings file: {}", e),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::InvalidSetting {
            key: path_str,
            message: e.to_string(),
        })
    }

    /// Overrides settings with any variables `lookup` returns.
    fn apply_env<F>(settings: &mut Settings, lookup: F) -> PayrollResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(server) = var(ENV_SMTP_SERVER) {
            settings.smtp.server = server;
        }
        if let Some(port) = var(ENV_SMTP_PORT) {
            settings.smtp.port = parse_number(ENV_SMTP_PORT, &port)?;
        }
        if let Some(sender) = var(ENV_SENDER_EMAIL) {
            settings.smtp.sender_email = Some(sender);
        }
        if let Some(password) = var(ENV_SENDER_PASSWORD) {
            settings.smtp.sender_password = Some(password);
        }
        if let Some(timeout) = var(ENV_SMTP_TIMEOUT_SECS) {
            settings.smtp.timeout_secs = parse_number(ENV_SMTP_TIMEOUT_SECS, &timeout)?;
        }
        if let Some(dir) = var(ENV_OUTPUT_DIR) {
            settings.payslip.output_dir = PathBuf::from(dir);
        }
        if let Some(organization) = var(ENV_ORGANIZATION) {
            settings.payslip.organization = organization;
        }
        if let Some(symbol) = var(ENV_CURRENCY) {
            settings.payslip.currency_symbol = symbol;
        }
        if let Some(log_file) = var(ENV_LOG_FILE) {
            settings.payslip.log_file = PathBuf::from(log_file);
        }

        Ok(())
    }
}

fn parse_number<T>(key: &str, value: &str) -> PayrollResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| PayrollError::InvalidSetting {
            key: key.to_string(),
            message: format!("'{}': {}", value, e),
        })
}

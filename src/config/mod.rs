//! Configuration loading and management for payslip dispatch.
//!
//! Settings come from built-in defaults, an optional YAML file and the
//! environment, in that order of precedence.
//!
//! # Example
//!
//! ```no_run
//! use payslip_dispatch::config::SettingsLoader;
//!
//! let settings = SettingsLoader::load(None).unwrap();
//! println!("Writing payslips to {}", settings.payslip.output_dir.display());
//! ```

mod loader;
mod types;

pub use loader::{
    ENV_CURRENCY, ENV_LOG_FILE, ENV_ORGANIZATION, ENV_OUTPUT_DIR, ENV_SENDER_EMAIL,
    ENV_SENDER_PASSWORD, ENV_SMTP_PORT, ENV_SMTP_SERVER, ENV_SMTP_TIMEOUT_SECS, SettingsLoader,
};
pub use types::{PayslipSettings, Settings, SmtpSettings};

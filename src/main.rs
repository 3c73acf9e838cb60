use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use payslip_dispatch::batch::BatchProcessor;
use payslip_dispatch::config::{Settings, SettingsLoader};
use payslip_dispatch::delivery::{DeliveryService, SmtpMailer};
use payslip_dispatch::error::{PayrollError, PayrollResult};
use payslip_dispatch::loader::RosterLoader;
use payslip_dispatch::logging::init_logging;
use payslip_dispatch::models::BatchReport;
use payslip_dispatch::render::PdfRenderer;

/// Every employee was processed.
const EXIT_SUCCESS: u8 = 0;
/// Some employees could not be processed.
const EXIT_BATCH_FAILED: u8 = 1;
/// Settings or roster problems stopped the run before any employee.
const EXIT_SETUP_FAILED: u8 = 2;

/// Generate PDF payslips from an employee roster and email them.
#[derive(Debug, Parser)]
#[command(name = "payslip-dispatch", version, about)]
struct Cli {
    /// Employee roster (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    #[arg(default_value = "employees.xlsx")]
    input: PathBuf,

    /// Currency symbol printed before amounts (default "$")
    #[arg(long)]
    currency: Option<String>,

    /// YAML settings file; environment variables take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory payslips are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Error log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Increase console verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self) -> PayrollResult<Settings> {
        let mut settings = SettingsLoader::load(self.config.as_deref())?;
        if let Some(currency) = &self.currency {
            settings.payslip.currency_symbol = currency.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.payslip.output_dir = dir.clone();
        }
        if let Some(log_file) = &self.log_file {
            settings.payslip.log_file = log_file.clone();
        }
        Ok(settings)
    }
}

fn main() -> ExitCode {
    if let Some(warning) = dotenv_warning(dotenvy::dotenv()) {
        eprintln!("Warning: {}", warning);
    }
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(EXIT_SETUP_FAILED);
        }
    };

    if let Err(err) = init_logging(&settings.payslip.log_file, cli.verbose) {
        eprintln!("Error: {}", err);
        return ExitCode::from(EXIT_SETUP_FAILED);
    }

    match run(&cli, &settings) {
        Ok(report) => finish(&report, cli.json),
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: &Cli, settings: &Settings) -> PayrollResult<BatchReport> {
    let mailer = SmtpMailer::from_settings(&settings.smtp)?;
    let records = RosterLoader::load(&cli.input)?;

    let processor = BatchProcessor::new(
        PdfRenderer::new(&settings.payslip),
        DeliveryService::new(mailer, &settings.payslip.organization),
    );
    Ok(processor.process_all(&records))
}

fn finish(report: &BatchReport, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{}", body),
            Err(err) => eprintln!("Error: cannot serialize report: {}", err),
        }
    }

    println!("\n{}", report.summary());
    for failure in report.failures() {
        println!("  failed: {} ({})", failure.name, failure.employee_id);
    }

    if report.success() {
        println!("\nPayslip generation and emailing completed successfully!");
    } else {
        println!(
            "\nPayslip generation completed with some errors. Please check the output and log file."
        );
    }
    ExitCode::from(exit_code_for_report(report))
}

fn exit_code_for_report(report: &BatchReport) -> u8 {
    if report.success() {
        EXIT_SUCCESS
    } else {
        EXIT_BATCH_FAILED
    }
}

fn exit_code_for(err: &PayrollError) -> u8 {
    if err.is_fatal() {
        EXIT_SETUP_FAILED
    } else {
        EXIT_BATCH_FAILED
    }
}

/// A missing `.env` file is fine; the environment may already be set. Any
/// other problem with it is worth reporting.
fn dotenv_warning(result: dotenvy::Result<PathBuf>) -> Option<String> {
    match result {
        Err(err) if !err.not_found() => Some(format!("cannot load .env file: {}", err)),
        _ => None,
    }
}

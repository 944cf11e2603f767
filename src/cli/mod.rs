pub mod demo;
pub mod import;
pub mod init;
pub mod quick;
pub mod report;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand};

use crate::dataset::{load_dataset, Dataset};
use crate::error::{MetricsError, Result};
use crate::fmt::money;
use crate::settings::{load_settings, resolve_dataset_path, Settings};

#[derive(Parser)]
#[command(
    name = "erp-metrics",
    about = "Project, payroll and ledger metrics for a small-business ERP."
)]
pub struct Cli {
    /// Dataset file to read (default: the path in settings.json)
    #[arg(long, global = true)]
    pub dataset: Option<String>,
    /// Print the raw metrics as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write settings: dataset location, company name and currency symbol.
    Init {
        /// Dataset path to record in settings.json
        #[arg(long = "dataset-path")]
        dataset_path: Option<String>,
        /// Company name shown above reports
        #[arg(long)]
        company: Option<String>,
        /// Currency symbol used when formatting amounts
        #[arg(long)]
        currency: Option<String>,
    },
    /// Write the sample dataset.
    Demo {
        /// Output path (default: the configured dataset path)
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate reports from the dataset.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Compute pension, PAYE and net pay for one salary.
    Payroll {
        /// Base salary
        #[arg(allow_negative_numbers = true)]
        base: f64,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        allowances: f64,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        deductions: f64,
    },
    /// Compare an internal balance against a statement balance.
    Reconcile {
        /// Balance according to the books
        #[arg(allow_negative_numbers = true)]
        internal: f64,
        /// Balance according to the bank statement
        #[arg(allow_negative_numbers = true)]
        statement: f64,
    },
    /// Import tasks from a CSV export into the dataset.
    ImportTasks {
        /// Path to the CSV file
        file: String,
        /// Project the tasks belong to
        #[arg(long)]
        project: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Revenue, costs, margin and ROI per project.
    Profitability {
        /// Only this project id
        #[arg(long)]
        project: Option<String>,
    },
    /// Status distribution, team performance and schedule adherence.
    Tasks {
        /// Only this project id (default: every task)
        #[arg(long)]
        project: Option<String>,
        /// Evaluate deadlines as of this date: YYYY-MM-DD (default: now)
        #[arg(long = "as-of")]
        as_of: Option<String>,
    },
    /// Pension, PAYE and net pay per pay period.
    Payroll {
        /// Period filter: YYYY-MM
        #[arg(long)]
        period: Option<String>,
    },
    /// Internal vs. statement balances per account.
    Reconciliation,
    /// Balance sheet subtotals and the accounting identity check.
    Balance,
    /// Profitability rolled up across all projects.
    Portfolio,
}

/// Loaded dataset plus the settings that drive formatting.
pub struct ReportContext {
    pub dataset: Dataset,
    pub settings: Settings,
}

impl ReportContext {
    pub fn load(dataset_override: Option<&str>) -> Result<Self> {
        let settings = load_settings();
        let path = resolve_dataset_path(dataset_override);
        let dataset = load_dataset(&path)?;
        Ok(Self { dataset, settings })
    }

    pub fn money(&self, val: f64) -> String {
        money(val, &self.settings.currency_symbol)
    }

    /// Prepend company name as a header line if non-empty.
    pub fn with_header(&self, body: String) -> String {
        if self.settings.company_name.is_empty() {
            body
        } else {
            format!("{}\n{body}", self.settings.company_name)
        }
    }
}

pub(crate) fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDateTime> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::MIN))
            .map_err(|_| MetricsError::InvalidDate(raw.to_string())),
        None => Ok(Local::now().naive_local()),
    }
}

pub(crate) fn validate_period(period: &str) -> Result<()> {
    let parts: Vec<&str> = period.split('-').collect();
    let valid = parts.len() == 2
        && parts[0].len() == 4
        && parts[0].parse::<i32>().is_ok()
        && matches!(parts[1].parse::<u32>(), Ok(1..=12));
    if valid {
        Ok(())
    } else {
        Err(MetricsError::InvalidPeriod(period.to_string()))
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn run(cli: Cli) -> Result<()> {
    let dataset = cli.dataset.as_deref();
    match cli.command {
        Commands::Init {
            dataset_path,
            company,
            currency,
        } => init::run(dataset_path, company, currency),
        Commands::Demo { output } => demo::run(output.as_deref().or(dataset)),
        Commands::Report { command } => report::run(command, dataset, cli.json),
        Commands::Payroll {
            base,
            allowances,
            deductions,
        } => quick::payroll(base, allowances, deductions, cli.json),
        Commands::Reconcile {
            internal,
            statement,
        } => quick::reconcile(internal, statement, cli.json),
        Commands::ImportTasks { file, project } => import::run(&file, &project, dataset),
    }
}

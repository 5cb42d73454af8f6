//! Command-line front end over the cash-flow engine.
//!
//! The binary owns the clock: when no `--date` is given the reference date is
//! the local calendar day.

pub mod output;

use std::{io::Write, path::PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::{
    config::{Config, ConfigManager},
    errors::Result,
    import::read_ledger_file,
    ledger::{find_largest_income, sum, Bucket, CashFlowReport, DateRange, Transaction},
};

#[derive(Debug, Parser)]
#[command(
    name = "cashflow_core_cli",
    version,
    about = "Budgeting periods and cash flow from a dated, multi-currency ledger"
)]
pub struct Cli {
    /// Disable coloured output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarise the current budgeting period
    Report {
        /// Ledger CSV file
        #[arg(short, long)]
        ledger: PathBuf,
        /// Config JSON file (creditor accounts)
        #[arg(short, long, env = "CASHFLOW_CORE_CONFIG")]
        config: Option<PathBuf>,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the largest income inside an exclusive date window
    Income {
        #[arg(short, long)]
        ledger: PathBuf,
        /// Exclusive lower bound (YYYY-MM-DD)
        #[arg(long)]
        after: Option<NaiveDate>,
        /// Exclusive upper bound (YYYY-MM-DD)
        #[arg(long)]
        before: Option<NaiveDate>,
    },
    /// List accounts with their role, plus known currencies
    Accounts {
        #[arg(short, long)]
        ledger: PathBuf,
        #[arg(short, long, env = "CASHFLOW_CORE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print build metadata
    Version,
}

/// Parses process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run(cli, &mut handle)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    if cli.plain {
        colored::control::set_override(false);
    }
    debug!(command = ?cli.command, "running command");

    match cli.command {
        Command::Report {
            ledger,
            config,
            date,
            json,
        } => {
            let ledger = read_ledger_file(&ledger)?;
            let config = load_config(config)?;
            let reference = date.unwrap_or_else(today);
            let report = ledger.report(reference, &config.creditors);
            if json {
                let text = serde_json::to_string_pretty(&report.summary())?;
                writeln!(out, "{text}")?;
            } else {
                render_report(out, &report, &config)?;
            }
        }
        Command::Income {
            ledger,
            after,
            before,
        } => {
            let ledger = read_ledger_file(&ledger)?;
            let range = DateRange::new(after, before);
            match find_largest_income(&ledger.transactions, range) {
                Some(txn) => output::field(out, "Largest income", describe(&txn))?,
                None => output::warning(out, "No income in the requested window")?,
            }
        }
        Command::Accounts { ledger, config } => {
            let ledger = read_ledger_file(&ledger)?;
            let config = load_config(config)?;
            output::section(out, "Accounts")?;
            for account in ledger.accounts() {
                output::field(out, &account, config.creditors.role(&account).label())?;
            }
            output::section(out, "Currencies")?;
            for currency in ledger.currencies() {
                output::field(out, &currency, "")?;
            }
        }
        Command::Version => {
            writeln!(
                out,
                "{} {} ({} {}, {}, built {})",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CASHFLOW_CORE_BUILD_HASH"),
                env!("CASHFLOW_CORE_BUILD_STATUS"),
                env!("CASHFLOW_CORE_BUILD_PROFILE"),
                env!("CASHFLOW_CORE_BUILD_TIMESTAMP"),
            )?;
            writeln!(out, "{}", env!("CASHFLOW_CORE_BUILD_RUSTC"))?;
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let manager = match path {
        Some(path) => ConfigManager::at_path(path),
        None => ConfigManager::new(),
    };
    manager.load()
}

fn describe(txn: &Transaction) -> String {
    let mut text = format!(
        "{} {} {} (x{}) on {}",
        txn.calendar_date(),
        output::amount(txn.amount),
        txn.currency,
        txn.rate,
        txn.account
    );
    if let Some(label) = &txn.label {
        text.push_str(&format!(" \"{label}\""));
    }
    text
}

fn render_report(out: &mut dyn Write, report: &CashFlowReport, config: &Config) -> Result<()> {
    output::section(out, format!("Cash flow as of {}", report.reference))?;

    match report.last_income() {
        Some(txn) => output::field(out, "Last income", describe(txn))?,
        None => output::warning(
            out,
            "No income found in the last 31 days; the current period is empty",
        )?,
    }
    if let Some(txn) = report.next_income() {
        output::field(out, "Next income", describe(txn))?;
    }
    if let Some(end) = report.periods.period_end {
        output::field(out, "Period ends before", end)?;
    }
    output::field(
        out,
        "Entries (prev/cur/next)",
        format!(
            "{}/{}/{}",
            report.periods.previous.len(),
            report.periods.current.len(),
            report.periods.upcoming.len()
        ),
    )?;

    output::section(out, format!("Buckets ({})", config.base_currency))?;
    let creditors = &config.creditors;
    for bucket in [Bucket::Income, Bucket::Expense, Bucket::Debt, Bucket::Repayment] {
        let entries = report.buckets.get(bucket);
        let trusted = !entries.is_empty()
            && entries
                .iter()
                .all(|txn| creditors.is_trusted(&txn.account));
        let label = format!("{} ({})", bucket.label(trusted), entries.len());
        output::field(out, &label, output::amount(sum(entries)))?;
    }

    output::separator(out)?;
    let totals = &report.totals;
    output::field(out, "Disposable income", output::amount(totals.disposable_income))?;
    output::field(out, "Net cash flow", output::amount(totals.net_cash_flow))?;
    output::field(out, "Previous balance", output::amount(totals.previous_balance))?;
    output::field(out, "Current balance", output::amount(totals.current_balance))?;
    Ok(())
}

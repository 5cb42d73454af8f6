#![doc(test(attr(deny(warnings))))]

//! Cash Flow Core derives budgeting periods from a multi-currency ledger.
//!
//! The engine finds the income events bounding the current period, splits the
//! ledger around them and aggregates the current period into income, expense,
//! debt and repayment buckets. Every stage is a pure function of the entries,
//! a reference date and the creditor configuration.
//!
//! ```
//! use cashflow_core::config::CreditorConfig;
//! use cashflow_core::ledger::{CashFlowReport, Transaction};
//! use chrono::NaiveDate;
//!
//! let payday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let ledger = vec![Transaction::new(payday, 1000.0, 1.0, "USD", "cash")];
//! let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//!
//! let report = CashFlowReport::compute(&ledger, today, &CreditorConfig::default());
//! assert_eq!(report.totals.disposable_income, 1000.0);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cash Flow Core tracing initialized.");
    });
}

//! Ledger model and the period-aggregation engine built on it.
//!
//! Data flows leaf-first: [`transaction`] → [`filters`] → [`income`] →
//! [`period`] → [`aggregate`], with [`report`] composing the stages.

pub mod aggregate;
pub mod filters;
pub mod income;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod report;
pub mod transaction;

pub use aggregate::{sum, Bucket, Buckets, CashFlowTotals};
pub use filters::DateRange;
pub use income::find_largest_income;
pub use ledger::Ledger;
pub use period::{IncomeBoundaries, PeriodResolver, Periods, LAST_INCOME_LOOKBACK_DAYS};
pub use report::{CashFlowReport, CashFlowSummary};
pub use transaction::{canonical, chronological, sort_chronologically, Transaction};

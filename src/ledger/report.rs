//! One-shot evaluation of the whole cash-flow pipeline.
//!
//! Each figure is a pure function of `(transactions, reference, creditors)`:
//! periods feed buckets, buckets and periods feed totals. Nothing is cached
//! between calls, so recomputing with identical inputs yields identical output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CreditorConfig;

use super::aggregate::{Buckets, CashFlowTotals};
use super::period::{PeriodResolver, Periods};
use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
    pub reference: NaiveDate,
    pub periods: Periods,
    pub buckets: Buckets,
    pub totals: CashFlowTotals,
    /// Start of the dashboard range: last income, else the earliest entry.
    pub range_start: Option<NaiveDate>,
    /// End of the dashboard range: next income, else the latest entry once
    /// the ledger holds at least two entries.
    pub range_end: Option<NaiveDate>,
}

impl CashFlowReport {
    pub fn compute(
        transactions: &[Transaction],
        reference: NaiveDate,
        creditors: &CreditorConfig,
    ) -> Self {
        let periods = PeriodResolver::new(reference).resolve(transactions);
        let buckets = Buckets::classify(&periods.current, creditors);
        let totals = CashFlowTotals::compute(&buckets, &periods.previous, &periods.current);

        let earliest = transactions.iter().map(Transaction::calendar_date).min();
        let latest = transactions.iter().map(Transaction::calendar_date).max();
        let range_start = periods.boundaries.last_income_date().or(earliest);
        let range_end = if transactions.len() < 2 {
            None
        } else {
            periods.boundaries.next_income_date().or(latest)
        };

        debug!(
            entries = transactions.len(),
            current = periods.current.len(),
            disposable_income = totals.disposable_income,
            "cash-flow report computed"
        );

        Self {
            reference,
            periods,
            buckets,
            totals,
            range_start,
            range_end,
        }
    }

    pub fn last_income(&self) -> Option<&Transaction> {
        self.periods.boundaries.last_income.as_ref()
    }

    pub fn next_income(&self) -> Option<&Transaction> {
        self.periods.boundaries.next_income.as_ref()
    }

    pub fn summary(&self) -> CashFlowSummary {
        CashFlowSummary {
            reference: self.reference,
            last_income: self.last_income().cloned(),
            next_income: self.next_income().cloned(),
            period_end: self.periods.period_end,
            range_start: self.range_start,
            range_end: self.range_end,
            previous_count: self.periods.previous.len(),
            current_count: self.periods.current.len(),
            upcoming_count: self.periods.upcoming.len(),
            totals: self.totals,
        }
    }
}

/// Compact, serializable view of a [`CashFlowReport`] without entry lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub reference: NaiveDate,
    pub last_income: Option<Transaction>,
    pub next_income: Option<Transaction>,
    pub period_end: Option<NaiveDate>,
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
    pub previous_count: usize,
    pub current_count: usize,
    pub upcoming_count: usize,
    pub totals: CashFlowTotals,
}

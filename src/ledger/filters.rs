//! Pure filters over transaction sequences.
//!
//! Every filter returns a new vector and leaves its input untouched, so they
//! compose in any order.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Open date interval. Both bounds are exclusive; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Self {
        Self { after, before }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn after(date: NaiveDate) -> Self {
        Self::new(Some(date), None)
    }

    pub fn before(date: NaiveDate) -> Self {
        Self::new(None, Some(date))
    }

    /// Half-open `[start, end)` expressed with exclusive bounds by moving the
    /// lower bound back one day.
    pub fn starting_on(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self::new(start.checked_sub_days(Days::new(1)), end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.before.is_some_and(|before| date >= before) {
            return false;
        }
        if self.after.is_some_and(|after| date <= after) {
            return false;
        }
        true
    }
}

pub fn by_date_range(transactions: &[Transaction], range: DateRange) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| range.contains(txn.calendar_date()))
        .cloned()
        .collect()
}

/// Keeps entries whose raw `amount` is strictly greater than `threshold`.
pub fn above_amount(transactions: &[Transaction], threshold: f64) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.amount > threshold)
        .cloned()
        .collect()
}

/// Keeps entries whose raw `amount` is strictly less than `threshold`.
pub fn below_amount(transactions: &[Transaction], threshold: f64) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.amount < threshold)
        .cloned()
        .collect()
}

/// Drops entries booked on one of `accounts`. Entries without an account are kept.
pub fn excluding_accounts(
    transactions: &[Transaction],
    accounts: &BTreeSet<String>,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| !(txn.has_account() && accounts.contains(&txn.account)))
        .cloned()
        .collect()
}

/// Keeps entries booked on one of `accounts`. Entries without an account are dropped.
pub fn only_accounts(transactions: &[Transaction], accounts: &BTreeSet<String>) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| txn.has_account() && accounts.contains(&txn.account))
        .cloned()
        .collect()
}

/// Drops entries flagged as transfer legs.
pub fn excluding_transfers(transactions: &[Transaction]) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|txn| !txn.is_transfer())
        .cloned()
        .collect()
}

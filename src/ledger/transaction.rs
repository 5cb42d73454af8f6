use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// A single dated ledger entry.
///
/// The meaning of the sign depends on the account role:
/// - cash accounts: negative entries are cash spending, positive entries are income
/// - creditor accounts: negative entries are debits, positive entries are repayments
///
/// `rate` converts `amount` into the ledger's base currency. Every rate in a
/// ledger must be expressed against the same base currency; switching base
/// currency later invalidates historical rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub rate: f64,
    pub currency: String,
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Marks one leg of a transfer between the user's own accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        rate: f64,
        currency: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            rate,
            currency: currency.into(),
            account: account.into(),
            label: None,
            source: None,
        }
    }

    /// Validating constructor for callers that receive raw numeric fields.
    pub fn try_new(
        date: NaiveDate,
        amount: f64,
        rate: f64,
        currency: impl Into<String>,
        account: impl Into<String>,
    ) -> Result<Self> {
        if !amount.is_finite() {
            return Err(LedgerError::InvalidInput(format!(
                "amount must be finite, got {amount}"
            )));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(LedgerError::InvalidInput(format!(
                "rate must be a positive finite number, got {rate}"
            )));
        }
        Ok(Self::new(date, amount, rate, currency, account))
    }

    /// Builds a transaction from a zero-based month index, as used by the
    /// ledger's wire format. Returns `None` for impossible dates.
    pub fn on_day(
        year: i32,
        month0: u32,
        day: u32,
        amount: f64,
        rate: f64,
        currency: impl Into<String>,
        account: impl Into<String>,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)?;
        Some(Self::new(date, amount, rate, currency, account))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Calendar date projection; no time of day, no timezone.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-based month index.
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Value of the entry in the ledger's base currency.
    pub fn normalized_amount(&self) -> f64 {
        self.rate * self.amount
    }

    pub fn has_account(&self) -> bool {
        !self.account.is_empty()
    }

    /// True when the entry is flagged as a transfer leg.
    pub fn is_transfer(&self) -> bool {
        self.source.as_deref().is_some_and(|source| !source.is_empty())
    }
}

/// Orders transactions by calendar date only. Entries on the same day compare
/// equal, so a stable sort keeps their relative input order.
pub fn chronological(a: &Transaction, b: &Transaction) -> Ordering {
    a.date.cmp(&b.date)
}

/// Total order over every field, used where a result must not depend on the
/// order the ledger was supplied in.
pub fn canonical(a: &Transaction, b: &Transaction) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.amount.total_cmp(&b.amount))
        .then_with(|| a.rate.total_cmp(&b.rate))
        .then_with(|| a.account.cmp(&b.account))
        .then_with(|| a.currency.cmp(&b.currency))
        .then_with(|| a.label.cmp(&b.label))
        .then_with(|| a.source.cmp(&b.source))
}

pub fn sort_chronologically(transactions: &mut [Transaction]) {
    transactions.sort_by(chronological);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_based_month_maps_to_calendar_month() {
        let txn = Transaction::on_day(2024, 0, 31, 10.0, 1.0, "USD", "cash").unwrap();
        assert_eq!(txn.calendar_date(), date(2024, 1, 31));
        assert_eq!(txn.month0(), 0);
        assert!(Transaction::on_day(2024, 1, 30, 10.0, 1.0, "USD", "cash").is_none());
        assert!(Transaction::on_day(2024, 12, 1, 10.0, 1.0, "USD", "cash").is_none());
    }

    #[test]
    fn try_new_rejects_non_finite_fields() {
        let day = date(2024, 3, 1);
        assert!(Transaction::try_new(day, f64::NAN, 1.0, "USD", "cash").is_err());
        assert!(Transaction::try_new(day, 5.0, 0.0, "USD", "cash").is_err());
        assert!(Transaction::try_new(day, 5.0, f64::INFINITY, "USD", "cash").is_err());
        assert!(Transaction::try_new(day, -5.0, 0.5, "EUR", "cash").is_ok());
    }

    #[test]
    fn same_day_entries_are_not_equal_unless_identical() {
        let a = Transaction::new(date(2024, 3, 1), 5.0, 1.0, "USD", "cash");
        let b = Transaction::new(date(2024, 3, 1), 6.0, 1.0, "USD", "cash");
        assert_eq!(chronological(&a, &b), Ordering::Equal);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn normalized_amount_uses_rate() {
        let txn = Transaction::new(date(2024, 3, 1), 200.0, 0.5, "EUR", "cash");
        assert!((txn.normalized_amount() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_source_is_not_a_transfer() {
        let txn = Transaction::new(date(2024, 3, 1), 5.0, 1.0, "USD", "cash");
        assert!(!txn.clone().with_source("").is_transfer());
        assert!(txn.with_source("savings").is_transfer());
    }
}

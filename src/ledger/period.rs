//! Budgeting periods bounded by detected income events.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::filters::{by_date_range, DateRange};
use super::income::find_largest_income;
use super::transaction::Transaction;

/// How far back from the reference date the last income event may lie.
pub const LAST_INCOME_LOOKBACK_DAYS: u64 = 31;

/// The income events framing the period that contains the reference date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeBoundaries {
    pub last_income: Option<Transaction>,
    pub next_income: Option<Transaction>,
}

impl IncomeBoundaries {
    pub fn last_income_date(&self) -> Option<NaiveDate> {
        self.last_income.as_ref().map(Transaction::calendar_date)
    }

    pub fn next_income_date(&self) -> Option<NaiveDate> {
        self.next_income.as_ref().map(Transaction::calendar_date)
    }
}

/// Ledger split around the current budgeting period.
///
/// When a last income exists, `previous`, `current` and `upcoming` partition
/// the ledger without overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Periods {
    pub boundaries: IncomeBoundaries,
    /// Exclusive end of the current period: next income date, or the reference date.
    pub period_end: Option<NaiveDate>,
    pub previous: Vec<Transaction>,
    pub current: Vec<Transaction>,
    pub upcoming: Vec<Transaction>,
}

/// Resolves periods relative to a reference date supplied by the caller's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodResolver {
    reference: NaiveDate,
}

impl PeriodResolver {
    pub fn new(reference: NaiveDate) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// Largest income in `(reference - 31 days, reference]`.
    pub fn last_income(&self, transactions: &[Transaction]) -> Option<Transaction> {
        let range = DateRange::new(
            self.reference
                .checked_sub_days(Days::new(LAST_INCOME_LOOKBACK_DAYS)),
            self.reference.succ_opt(),
        );
        find_largest_income(transactions, range)
    }

    /// Largest income strictly after `last_income` and before the same day one
    /// calendar month later.
    pub fn next_income(
        &self,
        transactions: &[Transaction],
        last_income: &Transaction,
    ) -> Option<Transaction> {
        let start = last_income.calendar_date();
        let range = DateRange::new(Some(start), start.checked_add_months(Months::new(1)));
        find_largest_income(transactions, range)
    }

    pub fn boundaries(&self, transactions: &[Transaction]) -> IncomeBoundaries {
        let last_income = self.last_income(transactions);
        let next_income = last_income
            .as_ref()
            .and_then(|last| self.next_income(transactions, last));
        IncomeBoundaries {
            last_income,
            next_income,
        }
    }

    pub fn period_end(&self, boundaries: &IncomeBoundaries) -> Option<NaiveDate> {
        boundaries.last_income.as_ref()?;
        Some(boundaries.next_income_date().unwrap_or(self.reference))
    }

    /// Everything strictly before the last income. Without a last income the
    /// bound is open, so the whole ledger counts as history and the previous
    /// balance stays the running total rather than dropping to zero.
    pub fn previous_period(
        &self,
        transactions: &[Transaction],
        boundaries: &IncomeBoundaries,
    ) -> Vec<Transaction> {
        match boundaries.last_income_date() {
            Some(start) => by_date_range(transactions, DateRange::before(start)),
            None => by_date_range(transactions, DateRange::unbounded()),
        }
    }

    /// Entries dated on or after the last income and before the period end.
    pub fn current_period(
        &self,
        transactions: &[Transaction],
        boundaries: &IncomeBoundaries,
    ) -> Vec<Transaction> {
        let Some(start) = boundaries.last_income_date() else {
            return Vec::new();
        };
        let range = DateRange::starting_on(start, self.period_end(boundaries));
        by_date_range(transactions, range)
    }

    /// Entries on or after the period end, i.e. outside both earlier periods.
    pub fn upcoming(
        &self,
        transactions: &[Transaction],
        boundaries: &IncomeBoundaries,
    ) -> Vec<Transaction> {
        match self.period_end(boundaries) {
            Some(end) => by_date_range(transactions, DateRange::starting_on(end, None)),
            None => Vec::new(),
        }
    }

    pub fn resolve(&self, transactions: &[Transaction]) -> Periods {
        let boundaries = self.boundaries(transactions);
        let period_end = self.period_end(&boundaries);
        debug!(
            reference = %self.reference,
            last_income = ?boundaries.last_income_date(),
            next_income = ?boundaries.next_income_date(),
            period_end = ?period_end,
            "periods resolved"
        );
        Periods {
            previous: self.previous_period(transactions, &boundaries),
            current: self.current_period(transactions, &boundaries),
            upcoming: self.upcoming(transactions, &boundaries),
            period_end,
            boundaries,
        }
    }
}

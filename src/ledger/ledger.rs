use chrono::NaiveDate;

use crate::config::CreditorConfig;

use super::{
    report::CashFlowReport,
    transaction::{sort_chronologically, Transaction},
};

/// Append-only set of entries supplied by the persistence layer, in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn extend(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.extend(transactions);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Entries sorted by calendar date; same-day entries keep insertion order.
    pub fn chronological(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sort_chronologically(&mut sorted);
        sorted
    }

    /// Distinct non-empty account names in order of first appearance by date.
    pub fn accounts(&self) -> Vec<String> {
        self.distinct(|txn| &txn.account)
    }

    /// Distinct non-empty currency codes in order of first appearance by date.
    pub fn currencies(&self) -> Vec<String> {
        self.distinct(|txn| &txn.currency)
    }

    pub fn report(&self, reference: NaiveDate, creditors: &CreditorConfig) -> CashFlowReport {
        CashFlowReport::compute(&self.transactions, reference, creditors)
    }

    fn distinct(&self, field: impl Fn(&Transaction) -> &String) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for txn in self.chronological() {
            let value = field(&txn);
            if !value.is_empty() && !seen.contains(value) {
                seen.push(value.clone());
            }
        }
        seen
    }
}

impl FromIterator<Transaction> for Ledger {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self::from_transactions(iter.into_iter().collect())
    }
}

//! Bucketing of current-period entries and the derived cash-flow figures.

use serde::{Deserialize, Serialize};

use crate::config::CreditorConfig;

use super::filters::excluding_transfers;
use super::transaction::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Positive cash entry that is not a transfer leg.
    Income,
    /// Immediate cash outflow.
    Expense,
    /// Spending on a creditor account, deferred from the current period's cash.
    Debt,
    /// Positive entry on a creditor account.
    Repayment,
}

impl Bucket {
    /// Classifies a single entry. Zero amounts and positive cash transfer legs
    /// land in no bucket.
    pub fn of(txn: &Transaction, creditors: &CreditorConfig) -> Option<Bucket> {
        let on_creditor = creditors.is_creditor(&txn.account);
        if txn.amount > 0.0 {
            if on_creditor {
                Some(Bucket::Repayment)
            } else if txn.is_transfer() {
                None
            } else {
                Some(Bucket::Income)
            }
        } else if txn.amount < 0.0 {
            if on_creditor {
                Some(Bucket::Debt)
            } else {
                Some(Bucket::Expense)
            }
        } else {
            None
        }
    }

    /// Display label. Trusted creditors (0% APR style) are framed as
    /// instalments instead of debt.
    pub fn label(self, trusted: bool) -> &'static str {
        match (self, trusted) {
            (Bucket::Income, _) => "Income",
            (Bucket::Expense, _) => "Expenses",
            (Bucket::Debt, false) => "Debts",
            (Bucket::Debt, true) => "Deferred payments",
            (Bucket::Repayment, false) => "Repayments",
            (Bucket::Repayment, true) => "Instalments",
        }
    }
}

/// Current-period entries split into disjoint buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub income: Vec<Transaction>,
    pub expenses: Vec<Transaction>,
    pub debts: Vec<Transaction>,
    pub repayments: Vec<Transaction>,
}

impl Buckets {
    /// Groups entries by [`Bucket::of`], keeping their relative order.
    pub fn classify(current: &[Transaction], creditors: &CreditorConfig) -> Self {
        let mut buckets = Self::default();
        for txn in current {
            if let Some(bucket) = Bucket::of(txn, creditors) {
                buckets.get_mut(bucket).push(txn.clone());
            }
        }
        buckets
    }

    pub fn get(&self, bucket: Bucket) -> &[Transaction] {
        match bucket {
            Bucket::Income => &self.income,
            Bucket::Expense => &self.expenses,
            Bucket::Debt => &self.debts,
            Bucket::Repayment => &self.repayments,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<Transaction> {
        match bucket {
            Bucket::Income => &mut self.income,
            Bucket::Expense => &mut self.expenses,
            Bucket::Debt => &mut self.debts,
            Bucket::Repayment => &mut self.repayments,
        }
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len() + self.debts.len() + self.repayments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sum of `rate * amount` in the base currency.
pub fn sum(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .fold(0.0, |total, txn| total + txn.normalized_amount())
}

/// Figures derived from the buckets and the period split.
///
/// Note that a transfer between two of the user's own cash accounts counts as
/// income on its positive leg unless that leg carries a `source`; pairs of
/// transfer legs are not detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowTotals {
    pub income: f64,
    pub expenses: f64,
    pub debts: f64,
    pub repayments: f64,
    /// `expenses - repayments`
    pub expenses_and_repayments: f64,
    /// `income + expenses_and_repayments`
    pub disposable_income: f64,
    /// `income + expenses + debts`
    pub net_cash_flow: f64,
    pub previous_balance: f64,
    pub current_balance: f64,
}

impl CashFlowTotals {
    pub fn compute(buckets: &Buckets, previous: &[Transaction], current: &[Transaction]) -> Self {
        let income = sum(&buckets.income);
        let expenses = sum(&buckets.expenses);
        let debts = sum(&buckets.debts);
        let repayments = sum(&buckets.repayments);
        let expenses_and_repayments = expenses - repayments;
        let previous_balance = sum(&excluding_transfers(previous));
        let current_balance = previous_balance + sum(&excluding_transfers(current));
        Self {
            income,
            expenses,
            debts,
            repayments,
            expenses_and_repayments,
            disposable_income: income + expenses_and_repayments,
            net_cash_flow: income + expenses + debts,
            previous_balance,
            current_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(amount: f64, account: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        Transaction::new(date, amount, 1.0, "USD", account)
    }

    fn creditors() -> CreditorConfig {
        CreditorConfig::new(["card"]).with_trusted(["zero-apr"])
    }

    #[test]
    fn every_entry_lands_in_at_most_one_bucket() {
        let ledger = vec![
            txn(1000.0, "cash"),
            txn(-50.0, "cash"),
            txn(-200.0, "card"),
            txn(120.0, "card"),
            txn(0.0, "card"),
            txn(0.0, "cash"),
            txn(300.0, "cash").with_source("savings"),
            txn(-30.0, "zero-apr"),
        ];
        let config = creditors();
        let buckets = Buckets::classify(&ledger, &config);
        assert_eq!(buckets.len(), 5);
        for entry in &ledger {
            let hits = [Bucket::Income, Bucket::Expense, Bucket::Debt, Bucket::Repayment]
                .into_iter()
                .filter(|bucket| buckets.get(*bucket).contains(entry))
                .count();
            let expected = usize::from(Bucket::of(entry, &config).is_some());
            assert_eq!(hits, expected, "entry {entry:?}");
        }
    }

    #[test]
    fn buckets_agree_with_filter_composition() {
        use crate::ledger::filters::{above_amount, below_amount, excluding_accounts, only_accounts};

        let ledger = vec![
            txn(1000.0, "cash"),
            txn(-50.0, "cash"),
            txn(-200.0, "card"),
            txn(120.0, "card"),
            txn(0.0, "card"),
            txn(300.0, "cash").with_source("savings"),
            txn(75.0, "card").with_source("cash"),
            txn(-30.0, "zero-apr"),
            txn(40.0, ""),
        ];
        let config = creditors();
        let accounts = &config.creditors;
        let inflows = above_amount(&ledger, 0.0);
        let outflows = below_amount(&ledger, 0.0);

        let buckets = Buckets::classify(&ledger, &config);
        assert_eq!(
            buckets.income,
            excluding_accounts(&excluding_transfers(&inflows), accounts)
        );
        assert_eq!(buckets.expenses, excluding_accounts(&outflows, accounts));
        assert_eq!(buckets.debts, only_accounts(&outflows, accounts));
        assert_eq!(buckets.repayments, only_accounts(&inflows, accounts));
    }

    #[test]
    fn credit_spending_is_debt_not_expense() {
        let ledger = vec![txn(1000.0, "cash"), txn(-200.0, "card")];
        let buckets = Buckets::classify(&ledger, &creditors());
        assert!(buckets.expenses.is_empty());
        assert_eq!(buckets.debts, vec![ledger[1].clone()]);

        let totals = CashFlowTotals::compute(&buckets, &[], &ledger);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.net_cash_flow, 800.0);
        assert_eq!(totals.disposable_income, 1000.0);
    }

    #[test]
    fn netting_formula() {
        let ledger = vec![
            txn(2000.0, "cash"),
            txn(-300.0, "cash"),
            txn(-150.0, "card"),
            txn(100.0, "card"),
        ];
        let buckets = Buckets::classify(&ledger, &creditors());
        let totals = CashFlowTotals::compute(&buckets, &[txn(50.0, "cash")], &ledger);
        assert_eq!(totals.expenses_and_repayments, -400.0);
        assert_eq!(totals.disposable_income, 1600.0);
        assert_eq!(totals.net_cash_flow, 1550.0);
        assert_eq!(totals.previous_balance, 50.0);
        assert_eq!(totals.current_balance, 1700.0);
    }

    #[test]
    fn transfer_legs_are_left_out_of_income_and_balances() {
        let ledger = vec![txn(500.0, "cash").with_source("savings")];
        let buckets = Buckets::classify(&ledger, &CreditorConfig::default());
        assert!(buckets.income.is_empty());
        let totals = CashFlowTotals::compute(&buckets, &ledger, &ledger);
        assert_eq!(totals.previous_balance, 0.0);
        assert_eq!(totals.current_balance, 0.0);
    }

    #[test]
    fn unflagged_transfer_between_cash_accounts_counts_as_income() {
        let ledger = vec![txn(-250.0, "checking"), txn(250.0, "savings")];
        let buckets = Buckets::classify(&ledger, &CreditorConfig::default());
        assert_eq!(buckets.income.len(), 1);
        assert_eq!(buckets.expenses.len(), 1);
    }

    #[test]
    fn trusted_creditors_only_change_labels() {
        let config = creditors();
        let debt = txn(-30.0, "zero-apr");
        assert_eq!(Bucket::of(&debt, &config), Some(Bucket::Debt));
        let trusted = config.is_trusted(&debt.account);
        assert_eq!(Bucket::Debt.label(trusted), "Deferred payments");
        assert_eq!(Bucket::Debt.label(false), "Debts");
    }
}

#![allow(dead_code)]

use cashflow_core::ledger::Transaction;
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn entry(on: NaiveDate, amount: f64, account: &str) -> Transaction {
    Transaction::new(on, amount, 1.0, "USD", account)
}

pub fn foreign(on: NaiveDate, amount: f64, rate: f64, account: &str) -> Transaction {
    Transaction::new(on, amount, rate, "EUR", account)
}

/// Two pay cycles with spending on cash and credit accounts.
pub fn two_month_ledger() -> Vec<Transaction> {
    vec![
        entry(date(2024, 1, 25), 3000.0, "checking").with_label("salary"),
        entry(date(2024, 1, 28), -120.0, "checking"),
        entry(date(2024, 2, 2), -80.0, "card"),
        entry(date(2024, 2, 10), 200.0, "card").with_label("card payment"),
        entry(date(2024, 2, 12), 500.0, "checking").with_source("savings"),
        entry(date(2024, 2, 20), -45.5, "checking"),
        entry(date(2024, 2, 23), 3000.0, "checking").with_label("salary"),
        entry(date(2024, 2, 24), -60.0, "checking"),
        entry(date(2024, 2, 26), -30.0, "card"),
    ]
}

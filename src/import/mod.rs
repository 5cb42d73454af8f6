//! CSV interchange for ledgers.
//!
//! Columns: `date,currency,amount,rate,account,label,source`, with `date`
//! written as `YYYYMMDD`. `label` and `source` are optional and may be left
//! empty or omitted entirely.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    errors::{LedgerError, Result},
    ledger::{sort_chronologically, Ledger, Transaction},
};

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Deserialize, Serialize)]
struct LedgerRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    rate: String,
    #[serde(default)]
    account: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl LedgerRow {
    fn from_transaction(txn: &Transaction) -> Self {
        Self {
            date: txn.date.format(DATE_FORMAT).to_string(),
            currency: txn.currency.clone(),
            amount: txn.amount.to_string(),
            rate: txn.rate.to_string(),
            account: txn.account.clone(),
            label: txn.label.clone(),
            source: txn.source.clone(),
        }
    }

    fn into_transaction(self, line: u64) -> Result<Transaction> {
        let invalid = |reason: String| LedgerError::InvalidRecord { line, reason };

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|err| invalid(format!("date `{}`: {err}", self.date)))?;
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|err| invalid(format!("amount `{}`: {err}", self.amount)))?;
        let rate: f64 = self
            .rate
            .trim()
            .parse()
            .map_err(|err| invalid(format!("rate `{}`: {err}", self.rate)))?;

        let mut txn = Transaction::try_new(date, amount, rate, self.currency, self.account)
            .map_err(|err| invalid(err.to_string()))?;
        txn.label = non_empty(self.label);
        txn.source = non_empty(self.source);
        Ok(txn)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Parses a ledger CSV. Rows with an empty date are skipped.
pub fn parse_ledger<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut out = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let row: LedgerRow = record.deserialize(Some(&headers))?;
        if row.date.trim().is_empty() {
            warn!(line, "skipping ledger row without a date");
            continue;
        }
        out.push(row.into_transaction(line)?);
    }

    info!(entries = out.len(), "ledger parsed");
    Ok(out)
}

pub fn parse_ledger_str(data: &str) -> Result<Vec<Transaction>> {
    parse_ledger(data.as_bytes())
}

pub fn read_ledger_file(path: &Path) -> Result<Ledger> {
    let file = File::open(path)?;
    let mut ledger = Ledger::new();
    ledger.extend(parse_ledger(file)?);
    Ok(ledger)
}

/// Writes entries in chronological order with a header row.
pub fn write_ledger<W: Write>(transactions: &[Transaction], writer: W) -> Result<()> {
    let mut sorted = transactions.to_vec();
    sort_chronologically(&mut sorted);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for txn in &sorted {
        csv_writer.serialize(LedgerRow::from_transaction(txn))?;
    }
    if sorted.is_empty() {
        csv_writer.write_record([
            "date", "currency", "amount", "rate", "account", "label", "source",
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn stringify_ledger(transactions: &[Transaction]) -> Result<String> {
    let mut buffer = Vec::new();
    write_ledger(transactions, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| LedgerError::InvalidInput(err.to_string()))
}

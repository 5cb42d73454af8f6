//! Detection of the income event that bounds a budgeting period.

use tracing::{debug, trace};

use super::filters::{above_amount, by_date_range, DateRange};
use super::transaction::{canonical, Transaction};

/// Returns the entry representing the largest net income inside `range`.
///
/// Candidates are entries with a positive raw amount. They are reduced in
/// canonical order (see [`canonical`]) with this precedence:
/// 1. the first candidate seeds the running best;
/// 2. equal raw `amount`: the earlier calendar date wins, whatever the rates;
/// 3. otherwise the larger `rate * amount` wins.
///
/// Reducing in canonical order makes the result a function of the multiset of
/// entries, independent of the order the ledger was supplied in.
pub fn find_largest_income(transactions: &[Transaction], range: DateRange) -> Option<Transaction> {
    let mut candidates = above_amount(&by_date_range(transactions, range), 0.0);
    candidates.sort_by(canonical);

    let best = candidates.into_iter().reduce(prefer_income);
    debug!(
        after = ?range.after,
        before = ?range.before,
        found = ?best.as_ref().map(|txn| txn.calendar_date()),
        "income detection finished"
    );
    best
}

fn prefer_income(best: Transaction, candidate: Transaction) -> Transaction {
    // Raw amount equality is checked before the normalized comparison.
    if best.amount == candidate.amount {
        trace!(amount = best.amount, "equal income amounts, keeping earlier entry");
        return if best.calendar_date() > candidate.calendar_date() {
            candidate
        } else {
            best
        };
    }

    if best.normalized_amount() > candidate.normalized_amount() {
        best
    } else {
        candidate
    }
}

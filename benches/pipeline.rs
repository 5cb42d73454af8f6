use cashflow_core::{
    config::CreditorConfig,
    import::{parse_ledger_str, stringify_ledger},
    ledger::{find_largest_income, CashFlowReport, DateRange, Transaction},
};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_sample_ledger(txn_count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let accounts = ["checking", "savings", "visa", "wallet"];

    (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx / 20) as i64);
            let account = accounts[idx % accounts.len()];
            let amount = if idx % 97 == 0 {
                2800.0 + (idx % 7) as f64
            } else {
                -(5.0 + (idx % 120) as f64)
            };
            let rate = if account == "wallet" { 0.0068 } else { 1.0 };
            Transaction::new(date, amount, rate, "USD", account)
        })
        .collect()
}

fn bench_detection(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(20_000));

    c.bench_function("largest_income_20k", |b| {
        b.iter(|| black_box(find_largest_income(&ledger, DateRange::unbounded())))
    });
}

fn bench_report(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(20_000));
    let creditors = CreditorConfig::new(["visa"]);
    let reference = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();

    c.bench_function("cash_flow_report_20k", |b| {
        b.iter(|| black_box(CashFlowReport::compute(&ledger, reference, &creditors)))
    });
}

fn bench_csv(c: &mut Criterion) {
    let ledger = build_sample_ledger(black_box(20_000));
    let text = stringify_ledger(&ledger).expect("render ledger");

    c.bench_function("ledger_csv_parse_20k", |b| {
        b.iter(|| black_box(parse_ledger_str(&text).expect("parse ledger")))
    });
}

criterion_group!(benches, bench_detection, bench_report, bench_csv);
criterion_main!(benches);

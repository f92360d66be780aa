// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::filter::TransactionFilter;
use fintrack::models::{TransactionRecord, TxKind};

fn tx(kind: TxKind, amount: &str, category: &str, date: &str) -> TransactionRecord {
    TransactionRecord {
        id: 0,
        owner_id: "u1".into(),
        kind,
        amount: amount.parse().unwrap(),
        category: category.into(),
        description: None,
        occurred_on: date.into(),
        recorded_at: "2024-06-01 12:00:00".into(),
    }
}

fn sample() -> Vec<TransactionRecord> {
    vec![
        tx(TxKind::Expense, "100", "Food", "2024-01-05"),
        tx(TxKind::Expense, "40", "Travel", "2024-02-10"),
        tx(TxKind::Income, "500", "Salary", "2024-01-31"),
        tx(TxKind::Investment, "200", "Stocks", "2023-12-15"),
    ]
}

#[test]
fn unset_filter_matches_everything() {
    let records = sample();
    let filtered = TransactionFilter::default().apply(&records);
    assert_eq!(filtered.len(), records.len());
}

#[test]
fn predicates_combine_conjunctively() {
    let filter = TransactionFilter {
        kind: Some(TxKind::Expense),
        date_from: Some("2024-01-01".into()),
        date_to: Some("2024-01-31".into()),
        ..Default::default()
    };
    let filtered = filter.apply(&sample());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].category, "Food");
}

#[test]
fn month_is_zero_based() {
    // month0 = 0 is January
    let filter = TransactionFilter {
        month0: Some(0),
        year: Some(2024),
        ..Default::default()
    };
    let filtered = filter.apply(&sample());
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|t| t.occurred_on.starts_with("2024-01")));
}

#[test]
fn date_bounds_are_inclusive_string_comparisons() {
    let filter = TransactionFilter {
        date_from: Some("2024-01-05".into()),
        date_to: Some("2024-01-31".into()),
        ..Default::default()
    };
    let filtered = filter.apply(&sample());
    let dates: Vec<_> = filtered.iter().map(|t| t.occurred_on.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-05", "2024-01-31"]);
}

#[test]
fn contradictory_month_and_range_is_empty_not_an_error() {
    // January filter together with a February lower bound
    let filter = TransactionFilter {
        month0: Some(0),
        date_from: Some("2024-02-01".into()),
        ..Default::default()
    };
    assert!(filter.apply(&sample()).is_empty());
}

#[test]
fn malformed_date_excluded_only_while_date_predicates_active() {
    let mut records = sample();
    records.push(tx(TxKind::Expense, "10", "Food", "not-a-date"));

    let by_category = TransactionFilter {
        category: Some("Food".into()),
        ..Default::default()
    };
    // No date predicate: the malformed record still matches.
    assert_eq!(by_category.apply(&records).len(), 2);

    let by_range = TransactionFilter {
        category: Some("Food".into()),
        date_from: Some("2000-01-01".into()),
        ..Default::default()
    };
    assert_eq!(by_range.apply(&records).len(), 1);

    let by_month = TransactionFilter {
        category: Some("Food".into()),
        month0: Some(0),
        ..Default::default()
    };
    assert_eq!(by_month.apply(&records).len(), 1);
}

#[test]
fn amount_bounds_are_inclusive() {
    let filter = TransactionFilter {
        amount_min: Some("40".parse().unwrap()),
        amount_max: Some("100".parse().unwrap()),
        ..Default::default()
    };
    let filtered = filter.apply(&sample());
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|t| t.kind == TxKind::Expense));
}

#[test]
fn apply_is_idempotent() {
    let filter = TransactionFilter {
        kind: Some(TxKind::Expense),
        year: Some(2024),
        ..Default::default()
    };
    let once = filter.apply(&sample());
    let twice = filter.apply(&once);
    assert_eq!(once.len(), twice.len());
    for (a, b) in once.iter().zip(twice.iter()) {
        assert_eq!(a.occurred_on, b.occurred_on);
        assert_eq!(a.amount, b.amount);
    }
}

#[test]
fn stricter_filter_never_grows_the_result() {
    let records = sample();
    let loose = TransactionFilter {
        year: Some(2024),
        ..Default::default()
    };
    let strict = TransactionFilter {
        year: Some(2024),
        kind: Some(TxKind::Expense),
        category: Some("Travel".into()),
        ..Default::default()
    };
    assert!(strict.apply(&records).len() <= loose.apply(&records).len());
}

// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::aggregate::loans::{summary_by_person, totals};
use fintrack::filter::LoanFilter;
use fintrack::models::{LoanDirection, LoanRecord};
use rust_decimal::Decimal;

fn loan(direction: LoanDirection, amount: &str, person: &str, date: &str) -> LoanRecord {
    LoanRecord {
        id: 0,
        owner_id: "u1".into(),
        direction,
        amount: amount.parse().unwrap(),
        counterparty: person.into(),
        category: "Personal".into(),
        description: None,
        transaction_date: date.into(),
        due_date: None,
        status: "pending".into(),
        recorded_at: "2024-06-01 12:00:00".into(),
    }
}

#[test]
fn matched_borrow_and_lend_settle_exactly() {
    let records = vec![
        loan(LoanDirection::Borrowed, "100", "Alice", "2024-01-01"),
        loan(LoanDirection::Lent, "100", "Alice", "2024-01-02"),
    ];
    let summary = summary_by_person(&records);
    assert_eq!(summary.len(), 1);
    let alice = &summary[0];
    assert_eq!(alice.person, "Alice");
    assert_eq!(alice.borrowed, Decimal::from(100));
    assert_eq!(alice.lent, Decimal::from(100));
    assert_eq!(alice.net_balance, Decimal::ZERO);
    assert_eq!(alice.transactions, 2);
    assert!(alice.settled);
}

#[test]
fn decimal_sums_keep_settlement_exact() {
    // 0.1 + 0.2 == 0.3 holds for decimals where float summation drifts.
    let records = vec![
        loan(LoanDirection::Borrowed, "0.1", "Bob", "2024-01-01"),
        loan(LoanDirection::Borrowed, "0.2", "Bob", "2024-01-02"),
        loan(LoanDirection::Lent, "0.3", "Bob", "2024-01-03"),
    ];
    let summary = summary_by_person(&records);
    assert!(summary[0].settled);
    assert_eq!(summary[0].net_balance, Decimal::ZERO);
}

#[test]
fn net_balance_sign_conventions() {
    let records = vec![
        loan(LoanDirection::Borrowed, "300", "Alice", "2024-01-01"),
        loan(LoanDirection::Lent, "100", "Alice", "2024-01-02"),
        loan(LoanDirection::Lent, "50", "Bob", "2024-01-03"),
    ];
    let t = totals(&records);
    assert_eq!(t.borrowed, Decimal::from(300));
    assert_eq!(t.lent, Decimal::from(150));
    // Positive: the user owes overall.
    assert_eq!(t.net_balance, Decimal::from(150));

    let summary = summary_by_person(&records);
    let bob = summary.iter().find(|p| p.person == "Bob").unwrap();
    // Negative: Bob owes the user.
    assert_eq!(bob.net_balance, Decimal::from(-50));
    assert!(!bob.settled);
}

#[test]
fn counterparty_grouping_is_exact_string() {
    let records = vec![
        loan(LoanDirection::Lent, "10", "alice", "2024-01-01"),
        loan(LoanDirection::Lent, "10", "Alice", "2024-01-02"),
        loan(LoanDirection::Lent, "10", "Alice ", "2024-01-03"),
    ];
    assert_eq!(summary_by_person(&records).len(), 3);
}

#[test]
fn summary_orders_by_absolute_net_balance() {
    let records = vec![
        loan(LoanDirection::Lent, "20", "Small", "2024-01-01"),
        loan(LoanDirection::Borrowed, "500", "Big", "2024-01-02"),
        loan(LoanDirection::Lent, "200", "Mid", "2024-01-03"),
    ];
    let people: Vec<_> = summary_by_person(&records)
        .into_iter()
        .map(|p| p.person)
        .collect();
    assert_eq!(people, vec!["Big", "Mid", "Small"]);
}

#[test]
fn summary_reconciles_after_filtering() {
    let records = vec![
        loan(LoanDirection::Borrowed, "100", "Alice", "2024-01-01"),
        loan(LoanDirection::Lent, "40", "Alice", "2024-02-01"),
        loan(LoanDirection::Borrowed, "60", "Bob", "2024-01-15"),
    ];
    let filter = LoanFilter {
        date_from: Some("2024-01-01".into()),
        date_to: Some("2024-01-31".into()),
        ..Default::default()
    };
    let filtered = filter.apply(&records);
    assert_eq!(filtered.len(), 2);

    let t = totals(&filtered);
    let by_person = summary_by_person(&filtered);
    let net_sum: Decimal = by_person.iter().map(|p| p.net_balance).sum();
    assert_eq!(net_sum, t.net_balance);
}

#[test]
fn direction_and_person_filters() {
    let records = vec![
        loan(LoanDirection::Borrowed, "100", "Alice", "2024-01-01"),
        loan(LoanDirection::Lent, "40", "Alice", "2024-01-02"),
        loan(LoanDirection::Lent, "60", "Bob", "2024-01-03"),
    ];
    let filter = LoanFilter {
        direction: Some(LoanDirection::Lent),
        counterparty: Some("Alice".into()),
        ..Default::default()
    };
    let filtered = filter.apply(&records);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].amount, Decimal::from(40));
}

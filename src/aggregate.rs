// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over filtered record collections.
//!
//! Every function here is a total function of its input slice: empty or
//! sparse input yields well-defined zero/sentinel outputs, never an error.
//! Records with a malformed business date drop out of date-keyed operations
//! only; they still count toward scalar totals.

use crate::models::{LoanRecord, TransactionRecord, TxKind, WeightRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub investment: Decimal,
    /// income - expense - investment
    pub balance: Decimal,
}

/// Sum amounts per transaction kind. Balance is what remains of income after
/// expenses and investments; it may go negative.
pub fn totals(records: &[TransactionRecord]) -> Totals {
    let mut t = Totals::default();
    for r in records {
        match r.kind {
            TxKind::Income => t.income += r.amount,
            TxKind::Expense => t.expense += r.amount,
            TxKind::Investment => t.investment += r.amount,
        }
    }
    t.balance = t.income - t.expense - t.investment;
    t
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub expense_pct: Decimal,
    pub investment_pct: Decimal,
    pub cash_pct: Decimal,
}

fn percent_of_income(x: Decimal, income: Decimal) -> Decimal {
    if income > Decimal::ZERO {
        x / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Expense/investment/remaining-cash shares of total income. Defined as 0
/// across the board when there is no income, so a zero denominator never
/// leaks NaN into a display layer.
pub fn percentages(t: &Totals) -> Distribution {
    Distribution {
        expense_pct: percent_of_income(t.expense, t.income),
        investment_pct: percent_of_income(t.investment, t.income),
        cash_pct: percent_of_income(t.balance, t.income),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub investment: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// First day of the bucket's calendar month; the sort key and the only
    /// thing ordering is ever derived from.
    pub period: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub investment: Decimal,
}

impl MonthBucket {
    /// Display label ("Jan 2024"). Formatting happens at the presentation
    /// boundary only; never sort on this.
    pub fn label(&self) -> String {
        self.period.format("%b %Y").to_string()
    }
}

fn accumulate(sums: &mut (Decimal, Decimal, Decimal), r: &TransactionRecord) {
    match r.kind {
        TxKind::Income => sums.0 += r.amount,
        TxKind::Expense => sums.1 += r.amount,
        TxKind::Investment => sums.2 += r.amount,
    }
}

/// Group by business date. Sparse: days without records are absent, not
/// zero-filled. Output is ascending by date.
pub fn bucket_by_day(records: &[TransactionRecord]) -> Vec<DayBucket> {
    let mut map: BTreeMap<NaiveDate, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for r in records {
        let Some(date) = r.occurred_date() else {
            continue;
        };
        accumulate(map.entry(date).or_default(), r);
    }
    map.into_iter()
        .map(|(date, (income, expense, investment))| DayBucket {
            date,
            income,
            expense,
            investment,
        })
        .collect()
}

/// Group by calendar month of the business date, ascending.
pub fn bucket_by_month(records: &[TransactionRecord]) -> Vec<MonthBucket> {
    let mut map: BTreeMap<NaiveDate, (Decimal, Decimal, Decimal)> = BTreeMap::new();
    for r in records {
        let Some(date) = r.occurred_date() else {
            continue;
        };
        let Some(first) = date.with_day(1) else {
            continue;
        };
        accumulate(map.entry(first).or_default(), r);
    }
    map.into_iter()
        .map(|(period, (income, expense, investment))| MonthBucket {
            period,
            income,
            expense,
            investment,
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayAmount {
    /// None is the "no data" sentinel, paired with a zero amount.
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpenseExtremes {
    pub highest: DayAmount,
    pub lowest: DayAmount,
}

/// Day with the largest and smallest summed expense. Iteration is fixed to
/// ascending date, so a tie goes to the earlier day and the answer is stable
/// across runs. No expense data leaves both sides at the zero/None sentinel.
pub fn expense_extremes(records: &[TransactionRecord]) -> ExpenseExtremes {
    let mut extremes = ExpenseExtremes::default();
    let mut lowest_seen: Option<Decimal> = None;
    for b in bucket_by_day(records) {
        if b.expense == Decimal::ZERO {
            continue;
        }
        if b.expense > extremes.highest.amount {
            extremes.highest = DayAmount {
                date: Some(b.date),
                amount: b.expense,
            };
        }
        if lowest_seen.is_none_or(|low| b.expense < low) {
            lowest_seen = Some(b.expense);
            extremes.lowest = DayAmount {
                date: Some(b.date),
                amount: b.expense,
            };
        }
    }
    extremes
}

/// Average of the per-day totals for one kind, over the days that actually
/// have a non-zero total for it. Zero qualifying days defines the average
/// as 0 rather than dividing by nothing.
pub fn average_daily(records: &[TransactionRecord], kind: TxKind) -> Decimal {
    let mut sum = Decimal::ZERO;
    let mut days = 0u32;
    for b in bucket_by_day(records) {
        let day_total = match kind {
            TxKind::Income => b.income,
            TxKind::Expense => b.expense,
            TxKind::Investment => b.investment,
        };
        if day_total != Decimal::ZERO {
            sum += day_total;
            days += 1;
        }
    }
    if days == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// Expense sums per category, largest first (ties by name).
pub fn expense_by_category(records: &[TransactionRecord]) -> Vec<CategoryTotal> {
    let mut map: BTreeMap<&str, Decimal> = BTreeMap::new();
    for r in records {
        if r.kind == TxKind::Expense {
            *map.entry(r.category.as_str()).or_default() += r.amount;
        }
    }
    let mut out: Vec<CategoryTotal> = map
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    out
}

pub mod loans {
    use super::*;
    use crate::models::LoanDirection;

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct LoanTotals {
        pub borrowed: Decimal,
        pub lent: Decimal,
        /// borrowed - lent. Positive: the user owes; negative: the user is
        /// owed; exactly zero: settled.
        pub net_balance: Decimal,
    }

    pub fn totals(records: &[LoanRecord]) -> LoanTotals {
        let mut t = LoanTotals::default();
        for r in records {
            match r.direction {
                LoanDirection::Borrowed => t.borrowed += r.amount,
                LoanDirection::Lent => t.lent += r.amount,
            }
        }
        t.net_balance = t.borrowed - t.lent;
        t
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct PersonSummary {
        pub person: String,
        pub borrowed: Decimal,
        pub lent: Decimal,
        pub net_balance: Decimal,
        pub transactions: usize,
        /// Exact-zero net balance. Decimal sums make this comparison
        /// meaningful where float summation would leave residue.
        pub settled: bool,
    }

    /// Per-counterparty rollup, largest absolute net balance first (ties by
    /// name). Grouping is exact-string on the counterparty.
    pub fn summary_by_person(records: &[LoanRecord]) -> Vec<PersonSummary> {
        let mut map: BTreeMap<&str, (Decimal, Decimal, usize)> = BTreeMap::new();
        for r in records {
            let entry = map.entry(r.counterparty.as_str()).or_default();
            match r.direction {
                LoanDirection::Borrowed => entry.0 += r.amount,
                LoanDirection::Lent => entry.1 += r.amount,
            }
            entry.2 += 1;
        }
        let mut out: Vec<PersonSummary> = map
            .into_iter()
            .map(|(person, (borrowed, lent, transactions))| {
                let net_balance = borrowed - lent;
                PersonSummary {
                    person: person.to_string(),
                    borrowed,
                    lent,
                    net_balance,
                    transactions,
                    settled: net_balance == Decimal::ZERO,
                }
            })
            .collect();
        out.sort_by(|a, b| {
            b.net_balance
                .abs()
                .cmp(&a.net_balance.abs())
                .then_with(|| a.person.cmp(&b.person))
        });
        out
    }
}

pub mod weights {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct WeightStats {
        pub current: Decimal,
        pub highest: Decimal,
        pub lowest: Decimal,
        /// current - oldest in the set; 0 with fewer than two entries.
        /// Negative is a loss (the domain frames that as progress).
        pub trend: Decimal,
    }

    /// Stats over a filtered weight set. Ordering is derived from
    /// `recorded_at` internally, so callers may pass records in any order.
    pub fn stats(records: &[WeightRecord]) -> WeightStats {
        let Some(first) = records.first() else {
            return WeightStats::default();
        };
        let mut current = first;
        let mut oldest = first;
        let mut highest = first.weight;
        let mut lowest = first.weight;
        for r in &records[1..] {
            if r.recorded_at > current.recorded_at {
                current = r;
            }
            if r.recorded_at < oldest.recorded_at {
                oldest = r;
            }
            highest = highest.max(r.weight);
            lowest = lowest.min(r.weight);
        }
        let trend = if records.len() > 1 {
            current.weight - oldest.weight
        } else {
            Decimal::ZERO
        };
        WeightStats {
            current: current.weight,
            highest,
            lowest,
            trend,
        }
    }
}

// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Predicate filters over record collections.
//!
//! Every predicate is optional; an unset predicate matches everything, and
//! active predicates combine as a logical AND. A contradictory combination
//! (say, `month0 = 0` with `date_from = "2024-02-01"`) produces an empty
//! result set, which is a valid answer rather than an error.

use crate::models::{LoanDirection, LoanRecord, TransactionRecord, TxKind, WeightRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Inclusive range check on a raw `YYYY-MM-DD` string.
///
/// Bounds compare as raw strings (valid for zero-padded ISO dates). A record
/// whose date does not parse is excluded whenever either bound is active.
fn date_in_range(raw: &str, from: Option<&str>, to: Option<&str>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
        return false;
    }
    from.is_none_or(|f| raw >= f) && to.is_none_or(|t| raw <= t)
}

/// Month/year match against the parsed business date. `month0` is
/// zero-based (0 = January). Malformed dates are excluded while either
/// constraint is active.
fn month_year_match(raw: &str, month0: Option<u32>, year: Option<i32>) -> bool {
    if month0.is_none() && year.is_none() {
        return true;
    }
    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return false;
    };
    month0.is_none_or(|m| date.month0() == m) && year.is_none_or(|y| date.year() == y)
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    /// Zero-based calendar month (0 = January), matched on the business date.
    pub month0: Option<u32>,
    pub year: Option<i32>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &TransactionRecord) -> bool {
        self.kind.is_none_or(|k| t.kind == k)
            && self.category.as_deref().is_none_or(|c| t.category == c)
            && month_year_match(&t.occurred_on, self.month0, self.year)
            && date_in_range(
                &t.occurred_on,
                self.date_from.as_deref(),
                self.date_to.as_deref(),
            )
            && self.amount_min.is_none_or(|m| t.amount >= m)
            && self.amount_max.is_none_or(|m| t.amount <= m)
    }

    pub fn apply(&self, records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        records.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoanFilter {
    pub direction: Option<LoanDirection>,
    pub counterparty: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl LoanFilter {
    pub fn matches(&self, l: &LoanRecord) -> bool {
        self.direction.is_none_or(|d| l.direction == d)
            && self
                .counterparty
                .as_deref()
                .is_none_or(|p| l.counterparty == p)
            && self.category.as_deref().is_none_or(|c| l.category == c)
            && date_in_range(
                &l.transaction_date,
                self.date_from.as_deref(),
                self.date_to.as_deref(),
            )
            && self.amount_min.is_none_or(|m| l.amount >= m)
            && self.amount_max.is_none_or(|m| l.amount <= m)
    }

    pub fn apply(&self, records: &[LoanRecord]) -> Vec<LoanRecord> {
        records.iter().filter(|l| self.matches(l)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeightFilter {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub min_weight: Option<Decimal>,
    pub max_weight: Option<Decimal>,
}

impl WeightFilter {
    pub fn matches(&self, w: &WeightRecord) -> bool {
        date_in_range(
            &w.recorded_day(),
            self.date_from.as_deref(),
            self.date_to.as_deref(),
        ) && self.min_weight.is_none_or(|m| w.weight >= m)
            && self.max_weight.is_none_or(|m| w.weight <= m)
    }

    pub fn apply(&self, records: &[WeightRecord]) -> Vec<WeightRecord> {
        records.iter().filter(|w| self.matches(w)).cloned().collect()
    }
}

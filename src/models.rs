// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
    Investment,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Investment => "investment",
        };
        f.write_str(s)
    }
}

impl FromStr for TxKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            "investment" => Ok(TxKind::Investment),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense|investment",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanDirection {
    /// Money the user took from the counterparty.
    Borrowed,
    /// Money the user gave to the counterparty.
    Lent,
}

impl fmt::Display for LoanDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanDirection::Borrowed => "borrowed",
            LoanDirection::Lent => "lent",
        };
        f.write_str(s)
    }
}

impl FromStr for LoanDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "borrowed" => Ok(LoanDirection::Borrowed),
            "lent" => Ok(LoanDirection::Lent),
            other => Err(anyhow::anyhow!(
                "Invalid loan type '{}', expected borrowed|lent",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        };
        f.write_str(s)
    }
}

impl FromStr for WeightUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" => Ok(WeightUnit::Lbs),
            other => Err(anyhow::anyhow!("Invalid unit '{}', expected kg|lbs", other)),
        }
    }
}

/// An income/expense/investment entry attributed to a business date.
///
/// `occurred_on` is kept as the raw `YYYY-MM-DD` string the record source
/// stores; range filters compare it lexicographically, which is only valid
/// for zero-padded ISO dates. `occurred_date` parses it on demand and yields
/// `None` for anything malformed so date-keyed operations can skip the record
/// instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub owner_id: String,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub occurred_on: String,
    /// Server-assigned creation timestamp, audit only. Never the business date.
    pub recorded_at: String,
}

impl TransactionRecord {
    pub fn occurred_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.occurred_on, "%Y-%m-%d").ok()
    }
}

/// A borrowed/lent entry against a named counterparty.
///
/// Counterparty identity is the exact string: two spellings of the same
/// person are two people.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: i64,
    pub owner_id: String,
    pub direction: LoanDirection,
    pub amount: Decimal,
    pub counterparty: String,
    pub category: String,
    pub description: Option<String>,
    pub transaction_date: String,
    pub due_date: Option<String>,
    /// Always "pending"; there is no settlement workflow.
    pub status: String,
    pub recorded_at: String,
}

/// A body-weight measurement. The creation timestamp *is* the measurement
/// date; "current" means most recently recorded, not latest on some other
/// date field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRecord {
    pub id: i64,
    pub owner_id: String,
    pub weight: Decimal,
    pub unit: WeightUnit,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl WeightRecord {
    /// Calendar day of the measurement, as the ISO string date filters compare.
    pub fn recorded_day(&self) -> String {
        self.recorded_at.date_naive().to_string()
    }
}

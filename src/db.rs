// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    LoanRecord, TransactionRecord, TxKind, WeightRecord, WeightUnit,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.fintrack", "Fintrack", "fintrack"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Amounts are stored as decimal TEXT and parsed at the fetch boundary,
    -- keeping currency arithmetic exact.
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense','investment')),
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        occurred_on TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_owner ON transactions(owner_id);

    CREATE TABLE IF NOT EXISTS loans(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('borrowed','lent')),
        amount TEXT NOT NULL,
        person TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        due_date TEXT,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_loans_owner ON loans(owner_id);

    CREATE TABLE IF NOT EXISTS weights(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id TEXT NOT NULL,
        weight TEXT NOT NULL,
        unit TEXT NOT NULL CHECK(unit IN ('kg','lbs')),
        notes TEXT,
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_weights_owner ON weights(owner_id);
    "#,
    )?;
    Ok(())
}

fn parse_amount(s: &str, id: i64) -> Result<rust_decimal::Decimal> {
    s.parse::<rust_decimal::Decimal>()
        .with_context(|| format!("Invalid amount '{}' on record {}", s, id))
}

/// All transactions belonging to one owner, newest business date first.
/// Callers must not rely on the order; the aggregation stage never does.
pub fn fetch_transactions(conn: &Connection, owner: &str) -> Result<Vec<TransactionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, type, amount, category, description, occurred_on, created_at
         FROM transactions WHERE owner_id=?1 ORDER BY occurred_on DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![owner])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;
        data.push(TransactionRecord {
            id,
            owner_id: r.get(1)?,
            kind: TxKind::from_str(&kind)?,
            amount: parse_amount(&amount, id)?,
            category: r.get(4)?,
            description: r.get(5)?,
            occurred_on: r.get(6)?,
            recorded_at: r.get(7)?,
        });
    }
    Ok(data)
}

/// All loans belonging to one owner, newest business date first.
pub fn fetch_loans(conn: &Connection, owner: &str) -> Result<Vec<LoanRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, type, amount, person, category, description, date, due_date, status, created_at
         FROM loans WHERE owner_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![owner])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let direction: String = r.get(2)?;
        let amount: String = r.get(3)?;
        data.push(LoanRecord {
            id,
            owner_id: r.get(1)?,
            direction: crate::models::LoanDirection::from_str(&direction)?,
            amount: parse_amount(&amount, id)?,
            counterparty: r.get(4)?,
            category: r.get(5)?,
            description: r.get(6)?,
            transaction_date: r.get(7)?,
            due_date: r.get(8)?,
            status: r.get(9)?,
            recorded_at: r.get(10)?,
        });
    }
    Ok(data)
}

/// All weight entries belonging to one owner, most recently recorded first.
pub fn fetch_weights(conn: &Connection, owner: &str) -> Result<Vec<WeightRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, weight, unit, notes, created_at
         FROM weights WHERE owner_id=?1 ORDER BY created_at DESC, id DESC",
    )?;
    let mut rows = stmt.query(params![owner])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let weight: String = r.get(2)?;
        let unit: String = r.get(3)?;
        let created: String = r.get(5)?;
        let recorded_at = DateTime::parse_from_rfc3339(&created)
            .with_context(|| format!("Invalid timestamp '{}' on weight {}", created, id))?
            .with_timezone(&Utc);
        data.push(WeightRecord {
            id,
            owner_id: r.get(1)?,
            weight: parse_amount(&weight, id)?,
            unit: WeightUnit::from_str(&unit)?,
            notes: r.get(4)?,
            recorded_at,
        });
    }
    Ok(data)
}

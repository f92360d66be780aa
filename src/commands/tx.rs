// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::TransactionFilter;
use crate::models::TxKind;
use crate::utils::{
    current_user, fmt_money, maybe_print_json, parse_date, parse_month_arg,
    parse_positive_decimal, pretty_table,
};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::{Connection, params};
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Business date from the CLI, defaulting to today. "Today" enters here, at
/// the presentation boundary; the filter and aggregation stages only ever see
/// the explicit value.
pub fn date_or_today(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("date") {
        Some(s) => Ok(parse_date(s)?.to_string()),
        None => Ok(chrono::Local::now().date_naive().to_string()),
    }
}

/// Translate the shared transaction filter flags into a filter spec.
pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    let mut f = TransactionFilter {
        kind: sub
            .get_one::<String>("type")
            .map(|s| TxKind::from_str(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        month0: sub
            .get_one::<String>("month")
            .map(|s| parse_month_arg(s))
            .transpose()?,
        year: sub
            .get_one::<String>("year")
            .map(|s| s.parse::<i32>())
            .transpose()?,
        date_from: sub.get_one::<String>("from").cloned(),
        date_to: sub.get_one::<String>("to").cloned(),
        amount_min: sub
            .get_one::<String>("min-amount")
            .map(|s| crate::utils::parse_decimal(s))
            .transpose()?,
        amount_max: sub
            .get_one::<String>("max-amount")
            .map(|s| crate::utils::parse_decimal(s))
            .transpose()?,
    };
    if sub.get_flag("current") {
        let today = chrono::Local::now().date_naive();
        f.month0 = Some(today.month0());
        f.year = Some(today.year());
    }
    Ok(f)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let kind = TxKind::from_str(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let date = date_or_today(sub)?;
    let desc = sub.get_one::<String>("desc").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO transactions(owner_id, type, amount, category, description, occurred_on)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![owner, kind.to_string(), amount.to_string(), category, desc, date],
    )?;
    println!("Recorded {} {} on {} ({})", kind, amount, date, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = current_user(conn)?;
    let filter = filter_from_args(sub)?;
    let records = filter.apply(&crate::db::fetch_transactions(conn, &owner)?);

    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.occurred_on.clone(),
                    t.kind.to_string(),
                    fmt_money(&t.amount),
                    t.category.clone(),
                    t.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Type", "Amount", "Category", "Description"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<String> = Vec::new();
    if let Some(t) = sub.get_one::<String>("type") {
        sets.push("type=?");
        values.push(TxKind::from_str(t)?.to_string());
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        sets.push("amount=?");
        values.push(parse_positive_decimal(a)?.to_string());
    }
    if let Some(c) = sub.get_one::<String>("category") {
        sets.push("category=?");
        values.push(c.clone());
    }
    if let Some(d) = sub.get_one::<String>("date") {
        sets.push("occurred_on=?");
        values.push(parse_date(d)?.to_string());
    }
    if let Some(d) = sub.get_one::<String>("desc") {
        sets.push("description=?");
        values.push(d.clone());
    }
    if sets.is_empty() {
        anyhow::bail!("Nothing to update; pass at least one field flag");
    }

    let sql = format!(
        "UPDATE transactions SET {} WHERE id=? AND owner_id=?",
        sets.join(", ")
    );
    values.push(id.to_string());
    values.push(owner);
    let n = conn.execute(
        &sql,
        rusqlite::params_from_iter(values.iter().map(|v| v as &dyn rusqlite::ToSql)),
    )?;
    if n == 0 {
        anyhow::bail!("Transaction {} not found", id);
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner_id=?2",
        params![id, owner],
    )?;
    if n == 0 {
        anyhow::bail!("Transaction {} not found", id);
    }
    println!("Deleted transaction {}", id);
    Ok(())
}

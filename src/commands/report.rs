// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    average_daily, bucket_by_day, bucket_by_month, expense_by_category, expense_extremes,
    percentages, totals,
};
use crate::models::{TransactionRecord, TxKind};
use crate::utils::{current_user, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("daily", sub)) => daily(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn filtered(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRecord>> {
    let owner = current_user(conn)?;
    let filter = super::tx::filter_from_args(sub)?;
    Ok(filter.apply(&crate::db::fetch_transactions(conn, &owner)?))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = filtered(conn, sub)?;

    let totals = totals(&records);
    let dist = percentages(&totals);
    let months = bucket_by_month(&records);

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &serde_json::json!({ "totals": totals, "distribution": dist, "monthly": months }),
    )? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Investment", "Balance"],
            vec![vec![
                fmt_money(&totals.income),
                format!("{} ({:.1}%)", fmt_money(&totals.expense), dist.expense_pct),
                format!("{} ({:.1}%)", fmt_money(&totals.investment), dist.investment_pct),
                format!("{} ({:.1}%)", fmt_money(&totals.balance), dist.cash_pct),
            ]],
        )
    );
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|b| {
            vec![
                b.label(),
                fmt_money(&b.income),
                fmt_money(&b.expense),
                fmt_money(&b.investment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Investment"], rows)
    );
    Ok(())
}

fn daily(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = filtered(conn, sub)?;

    let days = bucket_by_day(&records);
    let avg_expense = average_daily(&records, TxKind::Expense);
    let avg_income = average_daily(&records, TxKind::Income);
    let extremes = expense_extremes(&records);

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &serde_json::json!({
            "daily": days,
            "avg_daily_expense": avg_expense,
            "avg_daily_income": avg_income,
            "extremes": extremes,
        }),
    )? {
        return Ok(());
    }

    let rows: Vec<Vec<String>> = days
        .iter()
        .map(|b| {
            vec![
                b.date.to_string(),
                fmt_money(&b.income),
                fmt_money(&b.expense),
                fmt_money(&b.investment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Income", "Expense", "Investment"], rows)
    );
    println!(
        "Avg daily expense {}  Avg daily income {}",
        fmt_money(&avg_expense),
        fmt_money(&avg_income)
    );
    let day = |d: &Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "N/A".into())
    };
    println!(
        "Highest expense day {} ({})  Lowest expense day {} ({})",
        fmt_money(&extremes.highest.amount),
        day(&extremes.highest.date),
        fmt_money(&extremes.lowest.amount),
        day(&extremes.lowest.date),
    );
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = filtered(conn, sub)?;

    let months = bucket_by_month(&records);
    if maybe_print_json(json_flag, jsonl_flag, &months)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|b| {
            vec![
                b.label(),
                fmt_money(&b.income),
                fmt_money(&b.expense),
                fmt_money(&b.investment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Investment"], rows)
    );
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let records = filtered(conn, sub)?;

    let breakdown = expense_by_category(&records);
    if maybe_print_json(json_flag, jsonl_flag, &breakdown)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = breakdown
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.amount)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], rows));
    Ok(())
}

// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::loans;
use crate::filter::LoanFilter;
use crate::models::LoanDirection;
use crate::utils::{
    current_user, fmt_money, maybe_print_json, parse_date, parse_positive_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn filter_from_args(sub: &clap::ArgMatches) -> Result<LoanFilter> {
    Ok(LoanFilter {
        direction: sub
            .get_one::<String>("type")
            .map(|s| LoanDirection::from_str(s))
            .transpose()?,
        counterparty: sub.get_one::<String>("person").cloned(),
        category: sub.get_one::<String>("category").cloned(),
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
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let direction = LoanDirection::from_str(sub.get_one::<String>("type").unwrap())?;
    let amount = parse_positive_decimal(sub.get_one::<String>("amount").unwrap())?;
    let person = sub.get_one::<String>("person").unwrap().trim().to_string();
    if person.is_empty() {
        anyhow::bail!("Person name must not be empty");
    }
    let category = sub.get_one::<String>("category").unwrap();
    let date = super::tx::date_or_today(sub)?;
    let due = sub
        .get_one::<String>("due")
        .map(|d| parse_date(d).map(|d| d.to_string()))
        .transpose()?;
    let desc = sub.get_one::<String>("desc").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO loans(owner_id, type, amount, person, category, description, date, due_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            owner,
            direction.to_string(),
            amount.to_string(),
            person,
            category,
            desc,
            date,
            due
        ],
    )?;
    println!("Recorded {} {} with '{}' on {}", direction, amount, person, date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = current_user(conn)?;
    let filter = filter_from_args(sub)?;
    let records = filter.apply(&crate::db::fetch_loans(conn, &owner)?);

    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.transaction_date.clone(),
                    l.direction.to_string(),
                    fmt_money(&l.amount),
                    l.counterparty.clone(),
                    l.category.clone(),
                    l.due_date.clone().unwrap_or_default(),
                    l.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Amount", "Person", "Category", "Due", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let n = conn.execute(
        "DELETE FROM loans WHERE id=?1 AND owner_id=?2",
        params![id, owner],
    )?;
    if n == 0 {
        anyhow::bail!("Loan {} not found", id);
    }
    println!("Deleted loan {}", id);
    Ok(())
}

fn owed_note(net: Decimal) -> &'static str {
    if net > Decimal::ZERO {
        "you owe"
    } else if net < Decimal::ZERO {
        "owed to you"
    } else {
        "settled"
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = current_user(conn)?;
    let filter = filter_from_args(sub)?;
    let records = filter.apply(&crate::db::fetch_loans(conn, &owner)?);

    let totals = loans::totals(&records);
    let by_person = loans::summary_by_person(&records);

    if maybe_print_json(
        json_flag,
        jsonl_flag,
        &serde_json::json!({ "totals": totals, "by_person": by_person }),
    )? {
        return Ok(());
    }

    println!(
        "Borrowed {}  Lent {}  Net {} ({})",
        fmt_money(&totals.borrowed),
        fmt_money(&totals.lent),
        fmt_money(&totals.net_balance.abs()),
        owed_note(totals.net_balance)
    );
    let rows: Vec<Vec<String>> = by_person
        .iter()
        .map(|p| {
            vec![
                p.person.clone(),
                fmt_money(&p.borrowed),
                fmt_money(&p.lent),
                format!("{} ({})", fmt_money(&p.net_balance.abs()), owed_note(p.net_balance)),
                p.transactions.to_string(),
                if p.settled { "settled".into() } else { "pending".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Person", "Borrowed", "Lent", "Net Balance", "Transactions", "Status"],
            rows,
        )
    );
    Ok(())
}

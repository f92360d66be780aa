// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::weights;
use crate::filter::WeightFilter;
use crate::models::WeightUnit;
use crate::utils::{current_user, maybe_print_json, parse_positive_decimal, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, params};
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("stats", sub)) => stats(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn filter_from_args(sub: &clap::ArgMatches) -> Result<WeightFilter> {
    Ok(WeightFilter {
        date_from: sub.get_one::<String>("from").cloned(),
        date_to: sub.get_one::<String>("to").cloned(),
        min_weight: sub
            .get_one::<String>("min")
            .map(|s| crate::utils::parse_decimal(s))
            .transpose()?,
        max_weight: sub
            .get_one::<String>("max")
            .map(|s| crate::utils::parse_decimal(s))
            .transpose()?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let value = parse_positive_decimal(sub.get_one::<String>("value").unwrap())?;
    let unit = WeightUnit::from_str(sub.get_one::<String>("unit").unwrap())?;
    let notes = sub.get_one::<String>("notes").map(|s| s.trim().to_string());
    // The creation timestamp is the measurement date.
    let now = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO weights(owner_id, weight, unit, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![owner, value.to_string(), unit.to_string(), notes, now],
    )?;
    println!("Recorded {} {}", value, unit);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = current_user(conn)?;
    let filter = filter_from_args(sub)?;
    let records = filter.apply(&crate::db::fetch_weights(conn, &owner)?);

    if !maybe_print_json(json_flag, jsonl_flag, &records)? {
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|w| {
                vec![
                    w.id.to_string(),
                    w.recorded_day(),
                    format!("{} {}", w.weight, w.unit),
                    w.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Date", "Weight", "Notes"], rows));
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_user(conn)?;
    let id: i64 = sub.get_one::<String>("id").unwrap().parse()?;
    let n = conn.execute(
        "DELETE FROM weights WHERE id=?1 AND owner_id=?2",
        params![id, owner],
    )?;
    if n == 0 {
        anyhow::bail!("Weight entry {} not found", id);
    }
    println!("Deleted weight entry {}", id);
    Ok(())
}

fn stats(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let owner = current_user(conn)?;
    let filter = filter_from_args(sub)?;
    let records = filter.apply(&crate::db::fetch_weights(conn, &owner)?);

    let stats = weights::stats(&records);
    if maybe_print_json(json_flag, jsonl_flag, &stats)? {
        return Ok(());
    }

    let unit = records
        .first()
        .map(|w| w.unit.to_string())
        .unwrap_or_default();
    let direction = if stats.trend < rust_decimal::Decimal::ZERO {
        "down"
    } else if stats.trend > rust_decimal::Decimal::ZERO {
        "up"
    } else {
        "flat"
    };
    println!(
        "{}",
        pretty_table(
            &["Current", "Highest", "Lowest", "Trend"],
            vec![vec![
                format!("{} {}", stats.current, unit),
                format!("{} {}", stats.highest, unit),
                format!("{} {}", stats.lowest, unit),
                format!("{} ({})", stats.trend.abs(), direction),
            ]],
        )
    );
    Ok(())
}

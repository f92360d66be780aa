// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::{cli, commands::exporter, db, utils::set_current_user};
use rusqlite::Connection;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    set_current_user(&conn, "alice").unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(owner_id,type,amount,category,description,occurred_on)
        VALUES ('alice','expense','12.34','Food','weekly run','2024-01-05');
        INSERT INTO transactions(owner_id,type,amount,category,occurred_on)
        VALUES ('bob','income','999','Salary','2024-01-06');
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn export_writes_only_the_active_users_rows_as_csv() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        &out_str,
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("expected export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "date,type,amount,category,description");
    assert_eq!(
        lines.next().unwrap(),
        "2024-01-05,expense,12.34,Food,weekly run"
    );
    assert!(lines.next().is_none());
}

#[test]
fn export_writes_pretty_json() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "fintrack",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("expected export subcommand");
    };
    exporter::handle(&conn, sub).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "expense");
    assert_eq!(items[0]["amount"], "12.34");
    assert_eq!(items[0]["category"], "Food");
}

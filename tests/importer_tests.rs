// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use splitbook::{cli, commands::importer};
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE incomes(
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            client TEXT NOT NULL,
            description TEXT NOT NULL,
            account TEXT NOT NULL,
            category TEXT NOT NULL,
            original_amount TEXT NOT NULL,
            currency TEXT NOT NULL,
            received_amount TEXT NOT NULL,
            converted_amount TEXT NOT NULL,
            split_amount_pkr TEXT NOT NULL,
            split_rate_used TEXT NOT NULL,
            status TEXT NOT NULL,
            notes TEXT
        );
        CREATE TABLE expenses(
            id INTEGER PRIMARY KEY,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            account TEXT NOT NULL,
            category TEXT NOT NULL,
            amount TEXT NOT NULL,
            currency TEXT NOT NULL,
            converted_amount TEXT NOT NULL,
            payment_status TEXT NOT NULL,
            notes TEXT
        );
        CREATE TABLE rules(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pattern TEXT NOT NULL,
            category TEXT NOT NULL,
            created_at TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

const INCOME_HEADER: &str = "date,client,description,account,category,original_amount,currency,received_amount,converted_amount,split_amount_pkr,split_rate_used,status,notes";

fn run_import(conn: &mut Connection, kind: &str, path: &str) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["splitbook", "import", kind, "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, import_m)
    } else {
        panic!("no import subcommand");
    }
}

#[test]
fn income_import_fills_derived_amounts_from_rate() {
    let mut conn = base_conn();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", INCOME_HEADER).unwrap();
    writeln!(
        file,
        "2025-02-03,Acme,Retainer,Meezan,Consulting,1000,USD,,,,280,Received,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, "income", &path).unwrap();

    let (received, converted, split): (String, String, String) = conn
        .query_row(
            "SELECT received_amount, converted_amount, split_amount_pkr FROM incomes",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(received, "1000");
    assert_eq!(converted, "280000");
    assert_eq!(split, "280000");
}

#[test]
fn income_import_applies_category_rules_when_column_is_empty() {
    let mut conn = base_conn();
    conn.execute(
        "INSERT INTO rules(pattern, category) VALUES ('(?i)acme', 'Consulting')",
        [],
    )
    .unwrap();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", INCOME_HEADER).unwrap();
    writeln!(
        file,
        "2025-02-03,ACME Corp,Retainer,Meezan,,1000,USD,1000,280000,280000,280,Received,"
    )
    .unwrap();
    writeln!(
        file,
        "2025-02-04,Globex,License,HBL,,500,USD,500,140000,140000,280,Received,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, "income", &path).unwrap();

    let matched: String = conn
        .query_row(
            "SELECT category FROM incomes WHERE client='ACME Corp'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(matched, "Consulting");
    let fallback: String = conn
        .query_row(
            "SELECT category FROM incomes WHERE client='Globex'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(fallback, "Uncategorized");
}

#[test]
fn income_import_rejects_unknown_status() {
    let mut conn = base_conn();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", INCOME_HEADER).unwrap();
    writeln!(
        file,
        "2025-02-03,Acme,Retainer,Meezan,Consulting,1000,USD,,,,280,Maybe,"
    )
    .unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let err = run_import(&mut conn, "income", &path).unwrap_err();
    assert!(err.to_string().contains("Acme"));

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn expense_import_defaults_status_and_converted_amount() {
    let mut conn = base_conn();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "date,description,account,category,amount,currency,converted_amount,payment_status,notes"
    )
    .unwrap();
    writeln!(file, "2025-02-05,Hosting,Meezan,Infrastructure,14000,PKR,,,").unwrap();
    file.flush().unwrap();

    let path = file.path().to_str().unwrap().to_string();
    run_import(&mut conn, "expenses", &path).unwrap();

    let (converted, status): (String, String) = conn
        .query_row(
            "SELECT converted_amount, payment_status FROM expenses",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(converted, "14000");
    assert_eq!(status, "Pending");
}

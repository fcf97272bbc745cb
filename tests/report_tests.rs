// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use splitbook::cli;
use splitbook::commands::report::{load_expenses, load_incomes, selection_from_args};
use splitbook::filters::{DateRange, StatusFilter};
use splitbook::models::{IncomeStatus, PaymentStatus};

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
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn load_incomes_parses_stored_text_columns() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO incomes(date,client,description,account,category,original_amount,currency,\
         received_amount,converted_amount,split_amount_pkr,split_rate_used,status,notes) VALUES \
         ('2025-01-02','Acme','Retainer','Meezan','Consulting','100.50','USD','100.50','28140','28140','280','Partial','half paid')",
        [],
    )
    .unwrap();

    let records = load_incomes(&conn).unwrap();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.date.to_string(), "2025-01-02");
    assert_eq!(r.original_amount, Decimal::new(10050, 2));
    assert_eq!(r.split_amount_pkr, Decimal::new(28140, 0));
    assert_eq!(r.status, IncomeStatus::Partial);
    assert_eq!(r.notes.as_deref(), Some("half paid"));
}

#[test]
fn load_expenses_parses_stored_text_columns() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO expenses(date,description,account,category,amount,currency,converted_amount,\
         payment_status,notes) VALUES \
         ('2025-01-03','Hosting','Meezan','Infrastructure','50','USD','14000','Done',NULL)",
        [],
    )
    .unwrap();

    let records = load_expenses(&conn).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payment_status, PaymentStatus::Done);
    assert_eq!(records[0].converted_amount, Decimal::new(14000, 0));
    assert_eq!(records[0].notes, None);
}

#[test]
fn load_incomes_surfaces_bad_status_with_record_id() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO incomes(id,date,client,description,account,category,original_amount,currency,\
         received_amount,converted_amount,split_amount_pkr,split_rate_used,status,notes) VALUES \
         (7,'2025-01-02','Acme','Retainer','Meezan','Consulting','100','USD','100','28000','28000','280','Maybe',NULL)",
        [],
    )
    .unwrap();

    let err = load_incomes(&conn).unwrap_err();
    assert!(format!("{:#}", err).contains("Income record 7"));
}

#[test]
fn selection_is_built_from_report_flags() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "splitbook",
        "report",
        "summary",
        "--range",
        "last-quarter",
        "--status",
        "pending",
        "--category",
        " Consulting ",
    ]);

    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("report command not parsed");
    };
    let Some(("summary", sub)) = report_m.subcommand() else {
        panic!("summary subcommand not parsed");
    };

    let sel = selection_from_args(sub).unwrap();
    assert_eq!(sel.range, DateRange::LastQuarter);
    assert_eq!(sel.status, StatusFilter::Pending);
    assert_eq!(sel.category.as_deref(), Some("Consulting"));
    assert_eq!(sel.account, None);
}

#[test]
fn selection_rejects_unknown_range_key() {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "splitbook",
        "report",
        "summary",
        "--range",
        "next-week",
    ]);

    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("report command not parsed");
    };
    let Some(("summary", sub)) = report_m.subcommand() else {
        panic!("summary subcommand not parsed");
    };

    assert!(selection_from_args(sub).is_err());
}

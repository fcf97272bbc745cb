// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use splitbook::{cli, commands::rules};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
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

#[test]
fn newest_matching_rule_wins() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, category) VALUES ('(?i)hosting', 'Infrastructure')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO rules(pattern, category) VALUES ('(?i)aws hosting', 'Cloud')",
        [],
    )
    .unwrap();

    let cat = splitbook::utils::apply_category_rules(&conn, "AWS Hosting March").unwrap();
    assert_eq!(cat, Some("Cloud".to_string()));

    let cat = splitbook::utils::apply_category_rules(&conn, "Dedicated hosting").unwrap();
    assert_eq!(cat, Some("Infrastructure".to_string()));

    let cat = splitbook::utils::apply_category_rules(&conn, "Office rent").unwrap();
    assert_eq!(cat, None);
}

#[test]
fn rules_add_rejects_invalid_regex() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "splitbook",
        "rules",
        "add",
        "--pattern",
        " (?P< ",
        "--category",
        " Consulting ",
    ]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        let err = rules::handle(&conn, rules_m).unwrap_err();
        assert!(err.to_string().contains("Invalid regex pattern"));
    } else {
        panic!("rules command not parsed");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rules", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn rules_add_trims_pattern_and_category() {
    let conn = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "splitbook",
        "rules",
        "add",
        "--pattern",
        " (?i)acme ",
        "--category",
        " Consulting ",
    ]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        rules::handle(&conn, rules_m).unwrap();
    } else {
        panic!("rules command not parsed");
    }

    let (pattern, category): (String, String) = conn
        .query_row("SELECT pattern, category FROM rules", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(pattern, "(?i)acme");
    assert_eq!(category, "Consulting");
}

#[test]
fn rules_rm_trims_id_argument() {
    let conn = setup();
    conn.execute(
        "INSERT INTO rules(pattern, category) VALUES ('foo', 'Misc')",
        [],
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["splitbook", "rules", "rm", "--id", " 1 "]);

    if let Some(("rules", rules_m)) = matches.subcommand() {
        rules::handle(&conn, rules_m).unwrap();
    } else {
        panic!("rules command not parsed");
    }

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rules", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

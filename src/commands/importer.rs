// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{IncomeStatus, PaymentStatus};
use crate::utils::{apply_category_rules, parse_date, parse_decimal};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => import_income(conn, sub),
        Some(("expenses", sub)) => import_expenses(conn, sub),
        _ => Ok(()),
    }
}

fn field(rec: &csv::StringRecord, idx: usize) -> String {
    rec.get(idx).unwrap_or("").trim().to_string()
}

// Columns: date, client, description, account, category, original_amount,
// currency, received_amount, converted_amount, split_amount_pkr,
// split_rate_used, status, notes
fn import_income(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for result in rdr.records() {
        let rec = result?;
        let date_raw = field(&rec, 0);
        let client = field(&rec, 1);
        let description = field(&rec, 2);
        let account = field(&rec, 3);

        let date = parse_date(&date_raw)
            .with_context(|| format!("Invalid income date '{}'", date_raw))?;
        let original = parse_decimal(&field(&rec, 5))
            .with_context(|| format!("Invalid amount for '{}'", client))?;
        let currency = field(&rec, 6).to_uppercase();

        let received_raw = field(&rec, 7);
        let received = if received_raw.is_empty() {
            original
        } else {
            parse_decimal(&received_raw)
                .with_context(|| format!("Invalid received amount for '{}'", client))?
        };
        let rate_raw = field(&rec, 10);
        let rate = if rate_raw.is_empty() {
            Decimal::ONE
        } else {
            parse_decimal(&rate_raw).with_context(|| format!("Invalid rate for '{}'", client))?
        };
        let converted_raw = field(&rec, 8);
        let converted = if converted_raw.is_empty() {
            received * rate
        } else {
            parse_decimal(&converted_raw)
                .with_context(|| format!("Invalid converted amount for '{}'", client))?
        };
        let split_raw = field(&rec, 9);
        let split = if split_raw.is_empty() {
            converted
        } else {
            parse_decimal(&split_raw)
                .with_context(|| format!("Invalid split amount for '{}'", client))?
        };
        let status_raw = field(&rec, 11);
        let status = if status_raw.is_empty() {
            IncomeStatus::Received
        } else {
            status_raw
                .parse::<IncomeStatus>()
                .with_context(|| format!("Income '{}' on {}", client, date))?
        };
        let notes = Some(field(&rec, 12)).filter(|s| !s.is_empty());

        let mut category = field(&rec, 4);
        if category.is_empty() {
            category = apply_category_rules(&tx, &format!("{} {}", client, description))?
                .unwrap_or_else(|| "Uncategorized".to_string());
        }

        tx.execute(
            "INSERT INTO incomes(date, client, description, account, category, original_amount, \
             currency, received_amount, converted_amount, split_amount_pkr, split_rate_used, status, notes) \
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![
                date.to_string(),
                client,
                description,
                account,
                category,
                original.to_string(),
                currency,
                received.to_string(),
                converted.to_string(),
                split.to_string(),
                rate.to_string(),
                status.as_str(),
                notes
            ],
        )?;
        count += 1;
    }
    tx.commit()?;
    println!("Imported {} income records from {}", count, path);
    Ok(())
}

// Columns: date, description, account, category, amount, currency,
// converted_amount, payment_status, notes
fn import_expenses(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    for result in rdr.records() {
        let rec = result?;
        let date_raw = field(&rec, 0);
        let description = field(&rec, 1);
        let account = field(&rec, 2);

        let date = parse_date(&date_raw)
            .with_context(|| format!("Invalid expense date '{}'", date_raw))?;
        let amount = parse_decimal(&field(&rec, 4))
            .with_context(|| format!("Invalid amount for '{}'", description))?;
        let currency = field(&rec, 5).to_uppercase();

        let converted_raw = field(&rec, 6);
        let converted = if converted_raw.is_empty() {
            amount
        } else {
            parse_decimal(&converted_raw)
                .with_context(|| format!("Invalid converted amount for '{}'", description))?
        };
        let status_raw = field(&rec, 7);
        let status = if status_raw.is_empty() {
            PaymentStatus::Pending
        } else {
            status_raw
                .parse::<PaymentStatus>()
                .with_context(|| format!("Expense '{}' on {}", description, date))?
        };
        let notes = Some(field(&rec, 8)).filter(|s| !s.is_empty());

        let mut category = field(&rec, 3);
        if category.is_empty() {
            category = apply_category_rules(&tx, &description)?
                .unwrap_or_else(|| "Uncategorized".to_string());
        }

        tx.execute(
            "INSERT INTO expenses(date, description, account, category, amount, currency, \
             converted_amount, payment_status, notes) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
            params![
                date.to_string(),
                description,
                account,
                category,
                amount.to_string(),
                currency,
                converted.to_string(),
                status.as_str(),
                notes
            ],
        )?;
        count += 1;
    }
    tx.commit()?;
    println!("Imported {} expense records from {}", count, path);
    Ok(())
}

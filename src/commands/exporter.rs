// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::analytics;
use crate::commands::report::{load_expenses, load_incomes, selection_from_args};
use crate::export;
use crate::filters::{DateRange, filter_expenses, filter_incomes};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => export_income(conn, sub),
        Some(("expenses", sub)) => export_expenses(conn, sub),
        Some(("currencies", sub)) => export_currencies(conn, sub),
        Some(("summary", sub)) => export_summary(conn, sub),
        _ => Ok(()),
    }
}

fn out_path(
    sub: &clap::ArgMatches,
    report: &str,
    range: DateRange,
    today: NaiveDate,
) -> Result<PathBuf> {
    let dir = PathBuf::from(sub.get_one::<String>("dir").unwrap());
    fs::create_dir_all(&dir).with_context(|| format!("Create export dir {}", dir.display()))?;
    Ok(dir.join(export::export_filename(report, range, today)))
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create CSV {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_income(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let sel = selection_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let incomes = filter_incomes(&load_incomes(conn)?, &sel, today);
    let rows = export::income_rows(&incomes);
    let path = out_path(sub, export::INCOME_REPORT, sel.range, today)?;
    write_csv(&path, &rows)?;
    println!("Exported {} income rows to {}", rows.len(), path.display());
    Ok(())
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let sel = selection_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let expenses = filter_expenses(&load_expenses(conn)?, &sel, today);
    let rows = export::expense_rows(&expenses);
    let path = out_path(sub, export::EXPENSE_REPORT, sel.range, today)?;
    write_csv(&path, &rows)?;
    println!("Exported {} expense rows to {}", rows.len(), path.display());
    Ok(())
}

fn export_currencies(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let sel = selection_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let incomes = filter_incomes(&load_incomes(conn)?, &sel, today);
    let expenses = filter_expenses(&load_expenses(conn)?, &sel, today);
    let rows = export::currency_rows(&analytics::compute(&incomes, &expenses));
    let path = out_path(sub, export::CURRENCY_REPORT, sel.range, today)?;
    write_csv(&path, &rows)?;
    println!("Exported {} currency rows to {}", rows.len(), path.display());
    Ok(())
}

fn export_summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let sel = selection_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let incomes = filter_incomes(&load_incomes(conn)?, &sel, today);
    let expenses = filter_expenses(&load_expenses(conn)?, &sel, today);
    let rows = export::summary_rows(&analytics::compute(&incomes, &expenses));
    let path = out_path(sub, export::SUMMARY_REPORT, sel.range, today)?;
    write_csv(&path, &rows)?;
    println!("Exported profit and loss summary to {}", path.display());
    Ok(())
}

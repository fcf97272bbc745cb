// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Incomes with no original amount: the average-rate computation has
    //    nothing to divide by.
    let mut stmt =
        conn.prepare("SELECT id, date, client, original_amount FROM incomes ORDER BY date")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let client: String = r.get(2)?;
        let raw: String = r.get(3)?;
        match parse_decimal(&raw) {
            Ok(amount) if amount == Decimal::ZERO => {
                rows.push(vec![
                    "zero_original_amount".into(),
                    format!("income {} ({} {})", id, date, client),
                ]);
            }
            Ok(_) => {}
            Err(_) => {
                rows.push(vec![
                    "unparseable_amount".into(),
                    format!("income {} ({} {}): '{}'", id, date, client, raw),
                ]);
            }
        }
    }

    // 2) Records dated beyond today never match the bounded ranges.
    let today = chrono::Utc::now().date_naive().to_string();
    for (table, label) in [("incomes", "income"), ("expenses", "expense")] {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, date FROM {} WHERE date > ?1 ORDER BY date",
            table
        ))?;
        let mut cur = stmt.query([&today])?;
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            let date: String = r.get(1)?;
            rows.push(vec![
                "future_dated".into(),
                format!("{} {} ({})", label, id, date),
            ]);
        }
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

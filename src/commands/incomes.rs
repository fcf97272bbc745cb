// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::IncomeStatus;
use crate::utils::{
    apply_category_rules, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let client = sub.get_one::<String>("client").unwrap().trim().to_string();
    let description = sub
        .get_one::<String>("description")
        .unwrap()
        .trim()
        .to_string();
    let account = sub.get_one::<String>("account").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let currency = sub.get_one::<String>("currency").unwrap().to_uppercase();
    let received = match sub.get_one::<String>("received") {
        Some(s) => parse_decimal(s.trim())?,
        None => amount,
    };
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap().trim())?;
    let converted = match sub.get_one::<String>("converted") {
        Some(s) => parse_decimal(s.trim())?,
        None => received * rate,
    };
    let split = match sub.get_one::<String>("split") {
        Some(s) => parse_decimal(s.trim())?,
        None => converted,
    };
    let status: IncomeStatus = sub.get_one::<String>("status").unwrap().trim().parse()?;
    let note = sub
        .get_one::<String>("note")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let category = match sub.get_one::<String>("category") {
        Some(c) => c.trim().to_string(),
        None => apply_category_rules(conn, &format!("{} {}", client, description))?
            .unwrap_or_else(|| "Uncategorized".to_string()),
    };

    conn.execute(
        "INSERT INTO incomes(date, client, description, account, category, original_amount, \
         currency, received_amount, converted_amount, split_amount_pkr, split_rate_used, status, notes) \
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
        params![
            date.to_string(),
            client,
            description,
            account,
            category,
            amount.to_string(),
            currency,
            received.to_string(),
            converted.to_string(),
            split.to_string(),
            rate.to_string(),
            status.as_str(),
            note
        ],
    )?;
    println!(
        "Recorded income {} {} from '{}' on {} ({})",
        amount, currency, client, date, status
    );
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeListRow {
    pub date: String,
    pub client: String,
    pub account: String,
    pub category: String,
    pub currency: String,
    pub original_amount: String,
    pub split_amount_pkr: String,
    pub status: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.client.clone(),
                    r.account.clone(),
                    r.category.clone(),
                    r.currency.clone(),
                    r.original_amount.clone(),
                    r.split_amount_pkr.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Date", "Client", "Account", "Category", "CCY", "Amount", "Split (PKR)",
                    "Status"
                ],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<IncomeListRow>> {
    let mut sql = String::from(
        "SELECT date, client, account, category, currency, original_amount, split_amount_pkr, status \
         FROM incomes WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(parse_month(month.trim())?);
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND account=?");
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = if params_vec.is_empty() {
        stmt.query([])?
    } else {
        let params: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();
        stmt.query(rusqlite::params_from_iter(params))?
    };

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(IncomeListRow {
            date: r.get(0)?,
            client: r.get(1)?,
            account: r.get(2)?,
            category: r.get(3)?,
            currency: r.get(4)?,
            original_amount: r.get(5)?,
            split_amount_pkr: r.get(6)?,
            status: r.get(7)?,
        });
    }
    Ok(data)
}

// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::analytics::{self, Analytics};
use crate::filters::{DateRange, FilterSelection, StatusFilter, filter_expenses, filter_incomes};
use crate::models::{ExpenseRecord, IncomeRecord, IncomeStatus, PaymentStatus};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("accounts", sub)) => accounts(conn, sub)?,
        Some(("currencies", sub)) => currencies(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn selection_from_args(sub: &clap::ArgMatches) -> Result<FilterSelection> {
    let range: DateRange = sub.get_one::<String>("range").unwrap().trim().parse()?;
    let status: StatusFilter = sub.get_one::<String>("status").unwrap().trim().parse()?;
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let account = sub.get_one::<String>("account").map(|s| s.trim().to_string());
    Ok(FilterSelection {
        range,
        category,
        account,
        status,
    })
}

pub fn load_incomes(conn: &Connection) -> Result<Vec<IncomeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, client, description, account, category, original_amount, currency, \
         received_amount, converted_amount, split_amount_pkr, split_rate_used, status, notes \
         FROM incomes ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let original_s: String = r.get(6)?;
        let received_s: String = r.get(8)?;
        let converted_s: String = r.get(9)?;
        let split_s: String = r.get(10)?;
        let rate_s: String = r.get(11)?;
        let status_s: String = r.get(12)?;
        data.push(IncomeRecord {
            id,
            date: parse_date(&date_s).with_context(|| format!("Income record {}", id))?,
            client: r.get(2)?,
            description: r.get(3)?,
            account: r.get(4)?,
            category: r.get(5)?,
            original_amount: parse_decimal(&original_s)
                .with_context(|| format!("Income record {}", id))?,
            currency: r.get(7)?,
            received_amount: parse_decimal(&received_s)
                .with_context(|| format!("Income record {}", id))?,
            converted_amount: parse_decimal(&converted_s)
                .with_context(|| format!("Income record {}", id))?,
            split_amount_pkr: parse_decimal(&split_s)
                .with_context(|| format!("Income record {}", id))?,
            split_rate_used: parse_decimal(&rate_s)
                .with_context(|| format!("Income record {}", id))?,
            status: status_s
                .parse::<IncomeStatus>()
                .with_context(|| format!("Income record {}", id))?,
            notes: r.get(13)?,
        });
    }
    Ok(data)
}

pub fn load_expenses(conn: &Connection) -> Result<Vec<ExpenseRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, account, category, amount, currency, converted_amount, \
         payment_status, notes FROM expenses ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let date_s: String = r.get(1)?;
        let amount_s: String = r.get(5)?;
        let converted_s: String = r.get(7)?;
        let status_s: String = r.get(8)?;
        data.push(ExpenseRecord {
            id,
            date: parse_date(&date_s).with_context(|| format!("Expense record {}", id))?,
            description: r.get(2)?,
            account: r.get(3)?,
            category: r.get(4)?,
            amount: parse_decimal(&amount_s).with_context(|| format!("Expense record {}", id))?,
            currency: r.get(6)?,
            converted_amount: parse_decimal(&converted_s)
                .with_context(|| format!("Expense record {}", id))?,
            payment_status: status_s
                .parse::<PaymentStatus>()
                .with_context(|| format!("Expense record {}", id))?,
            notes: r.get(9)?,
        });
    }
    Ok(data)
}

fn run_analytics(conn: &Connection, sub: &clap::ArgMatches) -> Result<Analytics> {
    let sel = selection_from_args(sub)?;
    let today = chrono::Utc::now().date_naive();
    let incomes = filter_incomes(&load_incomes(conn)?, &sel, today);
    let expenses = filter_expenses(&load_expenses(conn)?, &sel, today);
    Ok(analytics::compute(&incomes, &expenses))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = run_analytics(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &a)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Total Income".to_string(), format!("{:.2}", a.total_income)],
        vec![
            "Total Expenses".to_string(),
            format!("{:.2}", a.total_expenses),
        ],
        vec!["Net Profit".to_string(), format!("{:.2}", a.net_profit)],
        vec![
            "Company Share (50%)".to_string(),
            format!("{:.2}", a.company_share),
        ],
        vec![
            "Roshaan Share (25%)".to_string(),
            format!("{:.2}", a.roshaan_share),
        ],
        vec![
            "Shahbaz Share (25%)".to_string(),
            format!("{:.2}", a.shahbaz_share),
        ],
        vec![
            "Remaining Company Balance".to_string(),
            format!("{:.2}", a.remaining_company_balance),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Amount (PKR)"], rows));
    Ok(())
}

fn breakdown_rows(
    income: &std::collections::BTreeMap<String, Decimal>,
    expense: &std::collections::BTreeMap<String, Decimal>,
) -> Vec<Vec<String>> {
    let names: BTreeSet<&String> = income.keys().chain(expense.keys()).collect();
    names
        .into_iter()
        .map(|name| {
            let inc = income.get(name).copied().unwrap_or(Decimal::ZERO);
            let exp = expense.get(name).copied().unwrap_or(Decimal::ZERO);
            vec![name.clone(), format!("{:.2}", inc), format!("{:.2}", exp)]
        })
        .collect()
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = run_analytics(conn, sub)?;
    let data = breakdown_rows(&a.income_by_category, &a.expense_by_category);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Income (PKR)", "Expense (PKR)"], data)
        );
    }
    Ok(())
}

fn accounts(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = run_analytics(conn, sub)?;
    let data = breakdown_rows(&a.income_by_account, &a.expense_by_account);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Account", "Income (PKR)", "Expense (PKR)"], data)
        );
    }
    Ok(())
}

fn currencies(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let a = run_analytics(conn, sub)?;
    let data: Vec<Vec<String>> = a
        .currency_breakdown
        .iter()
        .map(|(currency, totals)| {
            let rate = match totals.average_rate() {
                Some(rate) => format!("{:.4}", rate),
                None => "0.00".to_string(),
            };
            let share = match a.share_of_income(totals.pkr_amount) {
                Some(pct) => format!("{:.1}%", pct),
                None => "0%".to_string(),
            };
            vec![
                currency.clone(),
                format!("{:.2}", totals.original_amount),
                format!("{:.2}", totals.pkr_amount),
                totals.count.to_string(),
                rate,
                share,
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Currency", "Original", "PKR", "Records", "Avg Rate", "Share"],
                data
            )
        );
    }
    Ok(())
}

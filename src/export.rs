// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{Analytics, company_split, partner_split};
use crate::filters::DateRange;
use crate::models::{ExpenseRecord, IncomeRecord};

pub const INCOME_REPORT: &str = "Income-Report";
pub const EXPENSE_REPORT: &str = "Expense-Report";
pub const CURRENCY_REPORT: &str = "Currency-Analysis";
pub const SUMMARY_REPORT: &str = "Profit-Loss-Report";

/// `<ReportName>-<dateFilterKey>-<ISODate>.csv`
pub fn export_filename(report: &str, range: DateRange, today: NaiveDate) -> String {
    format!("{}-{}-{}.csv", report, range.key(), today)
}

#[derive(Debug, Serialize)]
pub struct IncomeRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Original Amount")]
    pub original_amount: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Received Amount")]
    pub received_amount: String,
    #[serde(rename = "Converted (PKR)")]
    pub converted_amount: String,
    #[serde(rename = "Split (PKR)")]
    pub split_amount: String,
    #[serde(rename = "Rate Used")]
    pub rate_used: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Company Share (PKR)")]
    pub company_share: String,
    #[serde(rename = "Roshaan Share (PKR)")]
    pub roshaan_share: String,
    #[serde(rename = "Shahbaz Share (PKR)")]
    pub shahbaz_share: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

/// Detail rows for filtered income, with the partner splits derived per row.
pub fn income_rows(records: &[IncomeRecord]) -> Vec<IncomeRow> {
    records
        .iter()
        .map(|r| {
            let partner = partner_split(r.split_amount_pkr);
            IncomeRow {
                date: r.date.to_string(),
                client: r.client.clone(),
                description: r.description.clone(),
                account: r.account.clone(),
                category: r.category.clone(),
                original_amount: format!("{:.2}", r.original_amount),
                currency: r.currency.clone(),
                received_amount: format!("{:.2}", r.received_amount),
                converted_amount: format!("{:.2}", r.converted_amount),
                split_amount: format!("{:.2}", r.split_amount_pkr),
                rate_used: format!("{:.4}", r.split_rate_used),
                status: r.status.to_string(),
                company_share: format!("{:.2}", company_split(r.split_amount_pkr)),
                roshaan_share: format!("{:.2}", partner),
                shahbaz_share: format!("{:.2}", partner),
                notes: r.notes.clone().unwrap_or_default(),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Converted (PKR)")]
    pub converted_amount: String,
    #[serde(rename = "Payment Status")]
    pub payment_status: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

pub fn expense_rows(records: &[ExpenseRecord]) -> Vec<ExpenseRow> {
    records
        .iter()
        .map(|r| ExpenseRow {
            date: r.date.to_string(),
            description: r.description.clone(),
            account: r.account.clone(),
            category: r.category.clone(),
            amount: format!("{:.2}", r.amount),
            currency: r.currency.clone(),
            converted_amount: format!("{:.2}", r.converted_amount),
            payment_status: r.payment_status.to_string(),
            notes: r.notes.clone().unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CurrencyRow {
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Original Amount")]
    pub original_amount: String,
    #[serde(rename = "PKR Amount")]
    pub pkr_amount: String,
    #[serde(rename = "Records")]
    pub count: u64,
    #[serde(rename = "Avg Rate")]
    pub average_rate: String,
    #[serde(rename = "Share of Income")]
    pub share: String,
}

/// Per-currency analysis rows. Rate and share render safe placeholders
/// instead of dividing by zero.
pub fn currency_rows(analytics: &Analytics) -> Vec<CurrencyRow> {
    analytics
        .currency_breakdown
        .iter()
        .map(|(currency, totals)| CurrencyRow {
            currency: currency.clone(),
            original_amount: format!("{:.2}", totals.original_amount),
            pkr_amount: format!("{:.2}", totals.pkr_amount),
            count: totals.count,
            average_rate: match totals.average_rate() {
                Some(rate) => format!("{:.4}", rate),
                None => "0.00".to_string(),
            },
            share: match analytics.share_of_income(totals.pkr_amount) {
                Some(pct) => format!("{:.1}%", pct),
                None => "0%".to_string(),
            },
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Amount (PKR)")]
    pub amount: String,
}

pub fn summary_rows(analytics: &Analytics) -> Vec<SummaryRow> {
    let row = |metric: &str, amount| SummaryRow {
        metric: metric.to_string(),
        amount: format!("{:.2}", amount),
    };
    vec![
        row("Total Income", analytics.total_income),
        row("Total Expenses", analytics.total_expenses),
        row("Net Profit", analytics.net_profit),
        row("Company Share (50%)", analytics.company_share),
        row("Roshaan Share (25%)", analytics.roshaan_share),
        row("Shahbaz Share (25%)", analytics.shahbaz_share),
        row(
            "Remaining Company Balance",
            analytics.remaining_company_balance,
        ),
    ]
}

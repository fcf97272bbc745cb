// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use splitbook::analytics;
use splitbook::export;
use splitbook::filters::DateRange;
use splitbook::models::{ExpenseRecord, IncomeRecord, IncomeStatus, PaymentStatus};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn income(split_pkr: i64) -> IncomeRecord {
    IncomeRecord {
        id: 0,
        date: date("2024-03-15"),
        client: "Acme".into(),
        description: "Retainer".into(),
        account: "Meezan".into(),
        category: "Consulting".into(),
        original_amount: Decimal::new(100, 0),
        currency: "USD".into(),
        received_amount: Decimal::new(100, 0),
        converted_amount: Decimal::new(split_pkr, 0),
        split_amount_pkr: Decimal::new(split_pkr, 0),
        split_rate_used: Decimal::new(280, 0),
        status: IncomeStatus::Received,
        notes: None,
    }
}

#[test]
fn income_rows_derive_partner_splits_per_row() {
    let rows = export::income_rows(&[income(1000)]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].split_amount, "1000.00");
    assert_eq!(rows[0].company_share, "500.00");
    assert_eq!(rows[0].roshaan_share, "250.00");
    assert_eq!(rows[0].shahbaz_share, "250.00");
    assert_eq!(rows[0].rate_used, "280.0000");
    assert_eq!(rows[0].notes, "");
}

#[test]
fn expense_rows_carry_payment_status_and_default_notes() {
    let record = ExpenseRecord {
        id: 0,
        date: date("2024-03-16"),
        description: "Hosting".into(),
        account: "Meezan".into(),
        category: "Infrastructure".into(),
        amount: Decimal::new(50, 0),
        currency: "USD".into(),
        converted_amount: Decimal::new(14000, 0),
        payment_status: PaymentStatus::Pending,
        notes: Some("march invoice".into()),
    };

    let rows = export::expense_rows(&[record]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payment_status, "Pending");
    assert_eq!(rows[0].converted_amount, "14000.00");
    assert_eq!(rows[0].notes, "march invoice");
}

#[test]
fn currency_rows_render_placeholders_instead_of_dividing_by_zero() {
    let mut zero_original = income(5000);
    zero_original.original_amount = Decimal::ZERO;
    zero_original.currency = "PKR".into();
    zero_original.status = IncomeStatus::Cancelled;

    // The only qualifying record has no original amount either.
    let mut qualifying = income(5000);
    qualifying.original_amount = Decimal::ZERO;
    qualifying.currency = "PKR".into();
    qualifying.split_amount_pkr = Decimal::ZERO;
    qualifying.converted_amount = Decimal::ZERO;

    let a = analytics::compute(&[zero_original, qualifying], &[]);
    let rows = export::currency_rows(&a);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].average_rate, "0.00");
    assert_eq!(rows[0].share, "0%");
}

#[test]
fn currency_rows_report_share_of_total_income() {
    let mut eur = income(2500);
    eur.currency = "EUR".into();
    let a = analytics::compute(&[income(7500), eur], &[]);

    let rows = export::currency_rows(&a);
    assert_eq!(rows.len(), 2);
    let eur_row = rows.iter().find(|r| r.currency == "EUR").unwrap();
    let usd_row = rows.iter().find(|r| r.currency == "USD").unwrap();
    assert_eq!(eur_row.share, "25.0%");
    assert_eq!(usd_row.share, "75.0%");
    assert_eq!(eur_row.count, 1);
}

#[test]
fn summary_rows_cover_all_seven_metrics() {
    let a = analytics::compute(
        &[income(30000)],
        &[ExpenseRecord {
            id: 0,
            date: date("2024-03-16"),
            description: "Hosting".into(),
            account: "Meezan".into(),
            category: "Infrastructure".into(),
            amount: Decimal::new(50, 0),
            currency: "PKR".into(),
            converted_amount: Decimal::new(18000, 0),
            payment_status: PaymentStatus::Done,
            notes: None,
        }],
    );

    let rows = export::summary_rows(&a);
    let metrics: Vec<&str> = rows.iter().map(|r| r.metric.as_str()).collect();
    assert_eq!(
        metrics,
        vec![
            "Total Income",
            "Total Expenses",
            "Net Profit",
            "Company Share (50%)",
            "Roshaan Share (25%)",
            "Shahbaz Share (25%)",
            "Remaining Company Balance",
        ]
    );
    assert_eq!(rows[0].amount, "30000.00");
    assert_eq!(rows[2].amount, "12000.00");
    assert_eq!(rows[6].amount, "-3000.00");
}

#[test]
fn filename_embeds_report_range_key_and_date() {
    let name = export::export_filename(
        export::INCOME_REPORT,
        DateRange::CurrentMonth,
        date("2026-08-05"),
    );
    assert_eq!(name, "Income-Report-current-month-2026-08-05.csv");

    let name = export::export_filename(
        export::SUMMARY_REPORT,
        DateRange::AllTime,
        date("2026-08-05"),
    );
    assert_eq!(name, "Profit-Loss-Report-all-time-2026-08-05.csv");
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{ExpenseRecord, IncomeRecord};

/// Per-currency income totals. `count` counts the qualifying records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurrencyTotals {
    pub original_amount: Decimal,
    pub pkr_amount: Decimal,
    pub count: u64,
}

impl CurrencyTotals {
    /// Average PKR rate across the bucket; None when nothing was recorded
    /// in the original currency.
    pub fn average_rate(&self) -> Option<Decimal> {
        self.pkr_amount.checked_div(self.original_amount)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Analytics {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub company_share: Decimal,
    pub roshaan_share: Decimal,
    pub shahbaz_share: Decimal,
    pub remaining_company_balance: Decimal,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub income_by_account: BTreeMap<String, Decimal>,
    pub expense_by_category: BTreeMap<String, Decimal>,
    pub expense_by_account: BTreeMap<String, Decimal>,
    pub currency_breakdown: BTreeMap<String, CurrencyTotals>,
}

impl Analytics {
    /// Percentage of total income, for breakdown displays. None when there
    /// is no income to take a share of.
    pub fn share_of_income(&self, amount: Decimal) -> Option<Decimal> {
        (amount * Decimal::ONE_HUNDRED).checked_div(self.total_income)
    }
}

/// Company keeps half of income, the two partners a quarter each.
pub fn company_split(amount: Decimal) -> Decimal {
    amount * Decimal::new(5, 1)
}

pub fn partner_split(amount: Decimal) -> Decimal {
    amount * Decimal::new(25, 2)
}

/// Single pass over already-filtered collections, folding into a zero-valued
/// result. Income records count only while Received or Partial; expenses
/// count whatever their payment status.
pub fn compute(incomes: &[IncomeRecord], expenses: &[ExpenseRecord]) -> Analytics {
    let mut acc = Analytics::default();

    for rec in incomes {
        if !rec.status.counts_toward_totals() {
            continue;
        }
        acc.total_income += rec.split_amount_pkr;
        *acc
            .income_by_category
            .entry(rec.category.clone())
            .or_insert(Decimal::ZERO) += rec.split_amount_pkr;
        *acc
            .income_by_account
            .entry(rec.account.clone())
            .or_insert(Decimal::ZERO) += rec.split_amount_pkr;
        let bucket = acc.currency_breakdown.entry(rec.currency.clone()).or_default();
        bucket.original_amount += rec.original_amount;
        bucket.pkr_amount += rec.split_amount_pkr;
        bucket.count += 1;
    }

    for rec in expenses {
        acc.total_expenses += rec.converted_amount;
        *acc
            .expense_by_category
            .entry(rec.category.clone())
            .or_insert(Decimal::ZERO) += rec.converted_amount;
        *acc
            .expense_by_account
            .entry(rec.account.clone())
            .or_insert(Decimal::ZERO) += rec.converted_amount;
    }

    acc.net_profit = acc.total_income - acc.total_expenses;
    acc.company_share = company_split(acc.total_income);
    acc.roshaan_share = partner_split(acc.total_income);
    acc.shahbaz_share = partner_split(acc.total_income);
    acc.remaining_company_balance = acc.company_share - acc.total_expenses;
    acc
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid status '{0}'")]
pub struct ParseStatusError(pub String);

/// Lifecycle of an income record. Only Received and Partial count toward
/// totals and breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeStatus {
    Received,
    Partial,
    Upcoming,
    Cancelled,
}

impl IncomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeStatus::Received => "Received",
            IncomeStatus::Partial => "Partial",
            IncomeStatus::Upcoming => "Upcoming",
            IncomeStatus::Cancelled => "Cancelled",
        }
    }

    pub fn counts_toward_totals(&self) -> bool {
        matches!(self, IncomeStatus::Received | IncomeStatus::Partial)
    }
}

impl FromStr for IncomeStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Received" => Ok(IncomeStatus::Received),
            "Partial" => Ok(IncomeStatus::Partial),
            "Upcoming" => Ok(IncomeStatus::Upcoming),
            "Cancelled" => Ok(IncomeStatus::Cancelled),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for IncomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Done,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Done => "Done",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(PaymentStatus::Pending),
            "Done" => Ok(PaymentStatus::Done),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub client: String,
    pub description: String,
    pub account: String,
    pub category: String,
    pub original_amount: Decimal,
    pub currency: String,
    pub received_amount: Decimal,
    pub converted_amount: Decimal,
    pub split_amount_pkr: Decimal,
    pub split_rate_used: Decimal,
    pub status: IncomeStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub account: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: String,
    pub converted_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
}

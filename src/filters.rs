// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

use crate::models::{ExpenseRecord, IncomeRecord, IncomeStatus, PaymentStatus};

#[derive(Debug, Error)]
#[error("Unknown date range '{0}'")]
pub struct ParseRangeError(pub String);

#[derive(Debug, Error)]
#[error("Unknown status filter '{0}'")]
pub struct ParseStatusFilterError(pub String);

/// Named reporting periods, resolved against "today" at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    CurrentMonth,
    LastMonth,
    Last3Months,
    Last6Months,
    Last30Days,
    Last90Days,
    CurrentYear,
    LastYear,
    ThisQuarter,
    LastQuarter,
    #[default]
    AllTime,
}

impl DateRange {
    pub const ALL: [DateRange; 11] = [
        DateRange::CurrentMonth,
        DateRange::LastMonth,
        DateRange::Last3Months,
        DateRange::Last6Months,
        DateRange::Last30Days,
        DateRange::Last90Days,
        DateRange::CurrentYear,
        DateRange::LastYear,
        DateRange::ThisQuarter,
        DateRange::LastQuarter,
        DateRange::AllTime,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateRange::CurrentMonth => "current-month",
            DateRange::LastMonth => "last-month",
            DateRange::Last3Months => "last-3-months",
            DateRange::Last6Months => "last-6-months",
            DateRange::Last30Days => "last-30-days",
            DateRange::Last90Days => "last-90-days",
            DateRange::CurrentYear => "current-year",
            DateRange::LastYear => "last-year",
            DateRange::ThisQuarter => "this-quarter",
            DateRange::LastQuarter => "last-quarter",
            DateRange::AllTime => "all-time",
        }
    }

    /// Resolve the named range to concrete date bounds.
    pub fn bounds(self, today: NaiveDate) -> DateBounds {
        match self {
            DateRange::CurrentMonth => DateBounds::Month {
                year: today.year(),
                month: today.month(),
            },
            DateRange::LastMonth => {
                let prev = months_back(today, 1);
                DateBounds::Month {
                    year: prev.year(),
                    month: prev.month(),
                }
            }
            DateRange::Last3Months => DateBounds::From(months_back(today, 3)),
            DateRange::Last6Months => DateBounds::From(months_back(today, 6)),
            DateRange::Last30Days => DateBounds::From(today - Duration::days(30)),
            DateRange::Last90Days => DateBounds::From(today - Duration::days(90)),
            DateRange::CurrentYear => DateBounds::Year(today.year()),
            DateRange::LastYear => DateBounds::Year(today.year() - 1),
            DateRange::ThisQuarter => DateBounds::From(quarter_start(today)),
            DateRange::LastQuarter => {
                // The previous quarter ends the day before this quarter starts.
                let current = quarter_start(today);
                DateBounds::Between(months_back(current, 3), current.pred_opt().unwrap())
            }
            DateRange::AllTime => DateBounds::All,
        }
    }
}

impl FromStr for DateRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .iter()
            .find(|r| r.key() == s)
            .copied()
            .ok_or_else(|| ParseRangeError(s.to_string()))
    }
}

/// Concrete date bounds a range resolves to. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBounds {
    All,
    Month { year: i32, month: u32 },
    Year(i32),
    From(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DateBounds {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            DateBounds::All => true,
            DateBounds::Month { year, month } => date.year() == year && date.month() == month,
            DateBounds::Year(year) => date.year() == year,
            DateBounds::From(start) => date >= start,
            DateBounds::Between(start, end) => date >= start && date <= end,
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}

/// Calendar months back from `date`, day clamped to the target month length.
/// Rolls over year boundaries, so one month before January lands in the
/// prior year's December.
fn months_back(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// First day of the fixed 3-month block (Jan/Apr/Jul/Oct) containing `date`.
fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap()
}

/// Record-state filter. Income and expenses interpret the same selection
/// differently: `received` and `cancelled` only narrow income, expenses
/// pass through those untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Received,
    Pending,
    Completed,
    Cancelled,
}

impl StatusFilter {
    pub fn key(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Received => "received",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
            StatusFilter::Cancelled => "cancelled",
        }
    }

    pub fn keeps_income(self, status: IncomeStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Received => status.counts_toward_totals(),
            StatusFilter::Pending => status == IncomeStatus::Upcoming,
            StatusFilter::Completed => status == IncomeStatus::Received,
            StatusFilter::Cancelled => status == IncomeStatus::Cancelled,
        }
    }

    pub fn keeps_expense(self, status: PaymentStatus) -> bool {
        match self {
            StatusFilter::All | StatusFilter::Received | StatusFilter::Cancelled => true,
            StatusFilter::Pending => status == PaymentStatus::Pending,
            StatusFilter::Completed => status == PaymentStatus::Done,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "received" => Ok(StatusFilter::Received),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            "cancelled" => Ok(StatusFilter::Cancelled),
            other => Err(ParseStatusFilterError(other.to_string())),
        }
    }
}

/// One set of report filters. `None` for category/account means "all".
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub range: DateRange,
    pub category: Option<String>,
    pub account: Option<String>,
    pub status: StatusFilter,
}

/// Filters applied in fixed order: date, category, account, status.
pub fn filter_incomes(
    records: &[IncomeRecord],
    sel: &FilterSelection,
    today: NaiveDate,
) -> Vec<IncomeRecord> {
    let bounds = sel.range.bounds(today);
    records
        .iter()
        .filter(|r| bounds.contains(r.date))
        .filter(|r| sel.category.as_deref().map_or(true, |c| r.category == c))
        .filter(|r| sel.account.as_deref().map_or(true, |a| r.account == a))
        .filter(|r| sel.status.keeps_income(r.status))
        .cloned()
        .collect()
}

pub fn filter_expenses(
    records: &[ExpenseRecord],
    sel: &FilterSelection,
    today: NaiveDate,
) -> Vec<ExpenseRecord> {
    let bounds = sel.range.bounds(today);
    records
        .iter()
        .filter(|r| bounds.contains(r.date))
        .filter(|r| sel.category.as_deref().map_or(true, |c| r.category == c))
        .filter(|r| sel.account.as_deref().map_or(true, |a| r.account == a))
        .filter(|r| sel.status.keeps_expense(r.payment_status))
        .cloned()
        .collect()
}

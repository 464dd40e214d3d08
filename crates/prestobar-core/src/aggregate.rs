//! Fare payment aggregation by calendar month.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::card::ActivityRecord;
use crate::money::{parse_dollar_amount, MoneyError};

/// Date-time layouts used by the card service, most common first
const DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only layouts
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Error raised while aggregating activity records
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A record's date could not be read
    #[error("unrecognised activity date: {0:?}")]
    InvalidDate(String),

    /// A record's amount could not be read
    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),
}

/// Total for a single month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTotal {
    /// "Year MonthAbbrev", e.g. "2024 Jan"
    pub label: String,
    pub total: Decimal,
}

/// Month totals in first-seen order.
///
/// The order follows the activity list as delivered by the card service;
/// nothing here sorts chronologically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    months: Vec<MonthTotal>,
}

impl MonthlyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the month `label`, appending the month if unseen
    pub fn add(&mut self, label: &str, amount: Decimal) {
        match self.months.iter_mut().find(|m| m.label == label) {
            Some(month) => month.total += amount,
            None => self.months.push(MonthTotal {
                label: label.to_string(),
                total: amount,
            }),
        }
    }

    /// Total for a month label
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.months
            .iter()
            .find(|m| m.label == label)
            .map(|m| m.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthTotal> {
        self.months.iter()
    }

    /// Month labels in insertion order
    pub fn labels(&self) -> Vec<&str> {
        self.months.iter().map(|m| m.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Fare payments binned by month plus the grand total
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FareSummary {
    pub months: MonthlyTotals,
    pub grand_total: Decimal,
}

/// Sum fare payment records by month; other record kinds are ignored.
pub fn aggregate_fare_payments(records: &[ActivityRecord]) -> Result<FareSummary, AggregateError> {
    let mut summary = FareSummary::default();

    for record in records.iter().filter(|r| r.kind.is_fare_payment()) {
        let label = month_label(&record.date)?;
        let amount = parse_dollar_amount(&record.amount)?;
        summary.months.add(&label, amount);
        summary.grand_total += amount;
    }

    Ok(summary)
}

/// "Year MonthAbbrev" label for a service timestamp
pub fn month_label(date: &str) -> Result<String, AggregateError> {
    let day = parse_activity_date(date)
        .ok_or_else(|| AggregateError::InvalidDate(date.to_string()))?;
    Ok(day.format("%Y %b").to_string())
}

/// Parse the calendar day of a service timestamp
fn parse_activity_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(date, format) {
            return Some(parsed.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(date, format) {
            return Some(parsed);
        }
    }
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.date_naive())
}

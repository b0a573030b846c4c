//! Subscription lifecycle calculations.
//!
//! Derives everything that is never persisted: active/expired status, the validity
//! period label inferred from a date range, and signed day counts. Every function
//! takes `today` explicitly so results are reproducible.

use crate::{
    entities::subscription,
    errors::{Error, Result},
};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Whether a subscription is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Expiry date is today or later
    Active,
    /// Expiry date is strictly before today
    Expired,
}

impl Status {
    /// Lowercase code used in filters
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nominal duration associated with a subscription's date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidityPeriod {
    /// One calendar month
    #[serde(rename = "1_month")]
    OneMonth,
    /// Three calendar months
    #[serde(rename = "3_months")]
    ThreeMonths,
    /// Six calendar months
    #[serde(rename = "6_months")]
    SixMonths,
    /// Twelve calendar months
    #[serde(rename = "1_year")]
    OneYear,
    /// Dates picked by hand
    #[serde(rename = "custom")]
    Custom,
}

impl ValidityPeriod {
    /// Every period, in the order they are offered to users
    pub const ALL: [Self; 5] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::Custom,
    ];

    /// Periods [`infer_validity_label`] can produce
    pub const INFERRED: [Self; 4] = [
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Stable code stored and accepted from input (e.g. `3_months`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1_month",
            Self::ThreeMonths => "3_months",
            Self::SixMonths => "6_months",
            Self::OneYear => "1_year",
            Self::Custom => "custom",
        }
    }

    /// Human-readable label (e.g. "3 Months")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneMonth => "1 Month",
            Self::ThreeMonths => "3 Months",
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
            Self::Custom => "Custom",
        }
    }

    /// Calendar months covered, or `None` for custom ranges
    #[must_use]
    pub const fn months(self) -> Option<u32> {
        match self {
            Self::OneMonth => Some(1),
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for ValidityPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ValidityPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidValidity {
                label: s.to_string(),
            })
    }
}

/// Classifies a subscription as active or expired.
///
/// A subscription expiring today is still active; only `expiry_date < today` is expired.
#[must_use]
pub fn classify_status(today: NaiveDate, expiry_date: NaiveDate) -> Status {
    if expiry_date < today {
        Status::Expired
    } else {
        Status::Active
    }
}

/// Whole-month difference between two dates, ignoring the day of month.
#[must_use]
pub fn month_difference(buy_date: NaiveDate, expiry_date: NaiveDate) -> i32 {
    let years = expiry_date.year() - buy_date.year();
    // month() is 1..=12 so the cast cannot truncate
    #[allow(clippy::cast_possible_wrap)]
    let months = expiry_date.month() as i32 - buy_date.month() as i32;
    years * 12 + months
}

/// Infers the validity label from a purchase/expiry date pair.
///
/// Exactly 12, 6 and 3 months map to their named periods. Any other difference,
/// including arbitrary hand-picked ranges, falls back to [`ValidityPeriod::OneMonth`]
/// so labels stay compatible with records created before custom ranges existed.
#[must_use]
pub fn infer_validity_label(buy_date: NaiveDate, expiry_date: NaiveDate) -> ValidityPeriod {
    match month_difference(buy_date, expiry_date) {
        12 => ValidityPeriod::OneYear,
        6 => ValidityPeriod::SixMonths,
        3 => ValidityPeriod::ThreeMonths,
        _ => ValidityPeriod::OneMonth,
    }
}

/// Signed number of days from `today` until `expiry_date`.
///
/// Positive when expiry is ahead, zero on the expiry day, negative once overdue.
#[must_use]
pub fn days_until(today: NaiveDate, expiry_date: NaiveDate) -> i64 {
    expiry_date.signed_duration_since(today).num_days()
}

/// Days since expiry as a positive count; zero while the subscription is active.
#[must_use]
pub fn days_overdue(today: NaiveDate, expiry_date: NaiveDate) -> i64 {
    (-days_until(today, expiry_date)).max(0)
}

/// True when `[buy_date, expiry_date]` overlaps the calendar month containing `today`.
#[must_use]
pub fn is_active_in_month(today: NaiveDate, buy_date: NaiveDate, expiry_date: NaiveDate) -> bool {
    let month_start = today - Days::new(u64::from(today.day0()));
    let starts_before_month_end = month_start
        .checked_add_months(Months::new(1))
        .is_none_or(|next_month| buy_date < next_month);

    starts_before_month_end && expiry_date >= month_start
}

/// Everything derived for a single subscription at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifecycleSummary {
    /// Active or expired
    pub status: Status,
    /// Inferred validity period
    pub validity: ValidityPeriod,
    /// Signed days until expiry
    pub days_remaining: i64,
    /// Whether the period overlaps the current month
    pub active_this_month: bool,
}

impl LifecycleSummary {
    /// Derives the summary from raw dates.
    #[must_use]
    pub fn derive(buy_date: NaiveDate, expiry_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            status: classify_status(today, expiry_date),
            validity: infer_validity_label(buy_date, expiry_date),
            days_remaining: days_until(today, expiry_date),
            active_this_month: is_active_in_month(today, buy_date, expiry_date),
        }
    }

    /// Derives the summary for a stored subscription.
    #[must_use]
    pub fn for_subscription(subscription: &subscription::Model, today: NaiveDate) -> Self {
        Self::derive(subscription.buy_date, subscription.expiry_date, today)
    }
}

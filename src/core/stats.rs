//! Stats aggregation business logic.
//!
//! Folds a snapshot of subscriptions into dashboard counts and revenue totals.
//! Monetary fields may arrive currency-formatted (`"₹1,499.50"`); malformed values
//! contribute zero instead of failing the whole aggregate.

use crate::{
    core::{
        lifecycle::{Status, classify_status},
        renewal::add_months,
    },
    entities::subscription,
    errors::{Error, Result},
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// A monetary value as it may arrive from the backend or a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Already numeric
    Number(f64),
    /// Possibly currency-formatted text
    Text(String),
}

impl Amount {
    /// Normalized numeric value; anything unparseable or non-finite is `0.0`.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(n) if n.is_finite() => *n,
            Self::Number(_) => 0.0,
            Self::Text(raw) => parse_amount(raw),
        }
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Amount> for Amount {
    fn from(value: &Amount) -> Self {
        value.clone()
    }
}

/// Strips everything except ASCII digits and `.` then parses the remainder.
///
/// Returns `None` when nothing parseable is left, e.g. `""`, `"abc"` or `"1.2.3"`.
#[must_use]
pub fn try_parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Lenient variant of [`try_parse_amount`]: malformed input yields `0.0`.
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    try_parse_amount(raw).unwrap_or(0.0)
}

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums amounts after normalization, rounded to cents.
///
/// ```
/// use subtrack::core::stats::sum_revenue;
/// assert!((sum_revenue(["₹1,499.50", "₹500"]) - 1999.5).abs() < f64::EPSILON);
/// assert!(sum_revenue(["abc", ""]).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn sum_revenue<I>(amounts: I) -> f64
where
    I: IntoIterator,
    I::Item: Into<Amount>,
{
    let total: f64 = amounts.into_iter().map(|a| a.into().value()).sum();
    round_cents(total)
}

/// Lookahead used to surface upcoming expirations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReminderWindow {
    /// Today plus two days
    TwoDays,
    /// Today plus seven days
    SevenDays,
    /// Today plus one calendar month
    OneMonth,
}

impl ReminderWindow {
    /// Every window, in display order
    pub const ALL: [Self; 3] = [Self::TwoDays, Self::SevenDays, Self::OneMonth];

    /// Stable code accepted from input
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TwoDays => "2days",
            Self::SevenDays => "7days",
            Self::OneMonth => "1month",
        }
    }

    /// Phrase for "No upcoming expirations in ..." messages
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::TwoDays => "next 2 days",
            Self::SevenDays => "next 7 days",
            Self::OneMonth => "next month",
        }
    }

    /// Last day (inclusive) of the window starting at `today`.
    ///
    /// The month window uses calendar addition, not a fixed day count.
    pub fn end_date(self, today: NaiveDate) -> Result<NaiveDate> {
        let days = match self {
            Self::TwoDays => 2,
            Self::SevenDays => 7,
            Self::OneMonth => return add_months(today, 1),
        };
        today
            .checked_add_days(Days::new(days))
            .ok_or(Error::DaysOutOfRange { date: today, days })
    }
}

impl fmt::Display for ReminderWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|window| window.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidWindow {
                window: s.to_string(),
            })
    }
}

impl TryFrom<String> for ReminderWindow {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ReminderWindow> for String {
    fn from(value: ReminderWindow) -> Self {
        value.as_str().to_string()
    }
}

/// Dashboard counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    /// Number of subscriptions considered
    pub total: usize,
    /// Expiring today or later
    pub active: usize,
    /// Expired before today
    pub expired: usize,
    /// Expiring within `[today, window_end]`
    pub in_window: usize,
}

/// Whether an expiry falls inside `[today, window_end]`.
#[must_use]
pub fn expires_within(expiry_date: NaiveDate, today: NaiveDate, window_end: NaiveDate) -> bool {
    expiry_date >= today && expiry_date <= window_end
}

/// Subscriptions expiring inside the window that still show reminders, soonest first.
///
/// Together with the dismissed ones these make up [`Stats::in_window`].
#[must_use]
pub fn upcoming_in_window(
    subscriptions: &[subscription::Model],
    today: NaiveDate,
    window_end: NaiveDate,
) -> Vec<&subscription::Model> {
    let mut upcoming: Vec<_> = subscriptions
        .iter()
        .filter(|s| !s.notification_dismissed)
        .filter(|s| expires_within(s.expiry_date, today, window_end))
        .collect();
    upcoming.sort_by_key(|s| s.expiry_date);
    upcoming
}

/// Folds subscriptions into [`Stats`]. `active + expired == total` always holds.
#[must_use]
pub fn aggregate(
    subscriptions: &[subscription::Model],
    today: NaiveDate,
    window_end: NaiveDate,
) -> Stats {
    subscriptions.iter().fold(
        Stats {
            total: subscriptions.len(),
            ..Stats::default()
        },
        |mut stats, sub| {
            match classify_status(today, sub.expiry_date) {
                Status::Active => stats.active += 1,
                Status::Expired => stats.expired += 1,
            }
            if expires_within(sub.expiry_date, today, window_end) {
                stats.in_window += 1;
            }
            stats
        },
    )
}

/// Revenue overview for the analysis view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RevenueAnalysis {
    /// Number of subscriptions sold
    pub total_buyers: usize,
    /// Sum of amounts, rounded to cents
    pub total_revenue: f64,
    /// Currently active
    pub active: usize,
    /// Currently expired
    pub expired: usize,
}

/// Computes revenue totals, optionally restricted to one service name.
#[must_use]
pub fn analyze(
    subscriptions: &[subscription::Model],
    today: NaiveDate,
    service: Option<&str>,
) -> RevenueAnalysis {
    let selected: Vec<&subscription::Model> = subscriptions
        .iter()
        .filter(|s| service.is_none_or(|name| s.subscription_name == name))
        .collect();

    let active = selected
        .iter()
        .filter(|s| classify_status(today, s.expiry_date) == Status::Active)
        .count();

    RevenueAnalysis {
        total_buyers: selected.len(),
        total_revenue: sum_revenue(selected.iter().map(|s| s.amount)),
        active,
        expired: selected.len() - active,
    }
}

/// Revenue grouped by service name, sorted by name.
#[must_use]
pub fn revenue_by_service(subscriptions: &[subscription::Model]) -> Vec<(String, f64)> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for sub in subscriptions {
        grouped
            .entry(sub.subscription_name.as_str())
            .or_default()
            .push(sub.amount);
    }

    grouped
        .into_iter()
        .map(|(name, amounts)| (name.to_string(), sum_revenue(amounts)))
        .collect()
}

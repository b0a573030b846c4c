//! Renewal rollforward business logic.
//!
//! Computes the new purchase/expiry dates when a subscription is renewed. An
//! active subscription is extended from its current expiry; an expired one is
//! restarted from today without backfilling the lapsed period.
//!
//! Month arithmetic uses [`NaiveDate::checked_add_months`], which clamps to the
//! last day of the target month: Jan 31 + 1 month is Feb 29 in 2024 and Feb 28
//! in 2023.

use crate::{
    core::lifecycle::{Status, ValidityPeriod, classify_status, infer_validity_label},
    errors::{Error, Result},
};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How long to renew for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenewalMode {
    /// Repeat the period inferred from the current dates
    #[serde(rename = "same")]
    Same,
    /// One calendar month
    #[serde(rename = "1_month")]
    OneMonth,
    /// Three calendar months
    #[serde(rename = "3_months")]
    ThreeMonths,
    /// Six calendar months
    #[serde(rename = "6_months")]
    SixMonths,
    /// One year
    #[serde(rename = "1_year")]
    OneYear,
}

impl RenewalMode {
    /// Every mode, in the order the renew dialog offers them
    pub const ALL: [Self; 5] = [
        Self::Same,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    /// Stable code accepted from input
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::OneMonth => "1_month",
            Self::ThreeMonths => "3_months",
            Self::SixMonths => "6_months",
            Self::OneYear => "1_year",
        }
    }

    /// Resolves the mode to a concrete period for the given current dates.
    #[must_use]
    pub fn resolve(self, buy_date: NaiveDate, expiry_date: NaiveDate) -> ValidityPeriod {
        match self {
            Self::Same => infer_validity_label(buy_date, expiry_date),
            Self::OneMonth => ValidityPeriod::OneMonth,
            Self::ThreeMonths => ValidityPeriod::ThreeMonths,
            Self::SixMonths => ValidityPeriod::SixMonths,
            Self::OneYear => ValidityPeriod::OneYear,
        }
    }
}

impl fmt::Display for RenewalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenewalMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidRenewalMode {
                mode: s.to_string(),
            })
    }
}

/// Outcome of a renewal, ready to be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Renewal {
    /// Purchase date after renewal
    pub new_buy_date: NaiveDate,
    /// Expiry date after renewal
    pub new_expiry_date: NaiveDate,
    /// Period that was actually applied
    pub applied: ValidityPeriod,
    /// Whether the subscription had lapsed before renewal
    pub was_expired: bool,
}

/// Adds calendar months to a date, clamping to month end.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or(Error::DateOutOfRange { date, months })
}

/// Computes the renewed dates for a subscription.
///
/// # Arguments
/// * `buy_date` - Current purchase date
/// * `expiry_date` - Current expiry date
/// * `mode` - Requested renewal length
/// * `today` - Reference date for the expired/active decision
///
/// # Errors
/// Returns [`Error::DateOutOfRange`] if the new expiry falls outside chrono's range.
pub fn renew(
    buy_date: NaiveDate,
    expiry_date: NaiveDate,
    mode: RenewalMode,
    today: NaiveDate,
) -> Result<Renewal> {
    let was_expired = classify_status(today, expiry_date) == Status::Expired;
    let (anchor, new_buy_date) = if was_expired {
        (today, today)
    } else {
        (expiry_date, buy_date)
    };

    let applied = mode.resolve(buy_date, expiry_date);
    // resolve() never yields Custom, but keep the arithmetic total
    let months = applied.months().unwrap_or(1);
    let new_expiry_date = add_months(anchor, months)?;

    Ok(Renewal {
        new_buy_date,
        new_expiry_date,
        applied,
        was_expired,
    })
}

/// Expiry date implied by picking a validity period for a purchase date.
///
/// Returns `Ok(None)` for [`ValidityPeriod::Custom`]: the expiry is then chosen by hand.
pub fn expiry_for_validity(
    buy_date: NaiveDate,
    validity: ValidityPeriod,
) -> Result<Option<NaiveDate>> {
    validity
        .months()
        .map(|months| add_months(buy_date, months))
        .transpose()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_renew_active_extends_from_expiry() {
        let today = date(2024, 3, 1);
        let renewal = renew(date(2024, 2, 10), date(2024, 3, 10), RenewalMode::OneMonth, today)
            .unwrap();

        assert!(!renewal.was_expired);
        assert_eq!(renewal.new_buy_date, date(2024, 2, 10));
        assert_eq!(renewal.new_expiry_date, date(2024, 4, 10));
        assert_eq!(renewal.applied, ValidityPeriod::OneMonth);
    }

    #[test]
    fn test_renew_expiring_today_counts_as_active() {
        let today = date(2024, 3, 10);
        let renewal =
            renew(date(2024, 2, 10), today, RenewalMode::ThreeMonths, today).unwrap();

        assert!(!renewal.was_expired);
        assert_eq!(renewal.new_buy_date, date(2024, 2, 10));
        assert_eq!(renewal.new_expiry_date, date(2024, 6, 10));
    }

    #[test]
    fn test_renew_expired_restarts_from_today() {
        let today = date(2024, 3, 20);
        let expiry = date(2024, 3, 10);

        for mode in RenewalMode::ALL {
            let renewal = renew(date(2024, 2, 10), expiry, mode, today).unwrap();
            assert!(renewal.was_expired);
            assert_eq!(renewal.new_buy_date, today, "mode {mode}");
        }

        let yearly = renew(date(2024, 2, 10), expiry, RenewalMode::OneYear, today).unwrap();
        assert_eq!(yearly.new_expiry_date, date(2025, 3, 20));
    }

    #[test]
    fn test_renew_same_reuses_inferred_period() {
        let today = date(2024, 5, 1);
        let renewal =
            renew(date(2024, 1, 5), date(2024, 7, 5), RenewalMode::Same, today).unwrap();

        assert_eq!(renewal.applied, ValidityPeriod::SixMonths);
        assert_eq!(renewal.new_expiry_date, date(2025, 1, 5));
    }

    #[test]
    fn test_renew_same_on_irregular_range_uses_one_month() {
        let today = date(2024, 1, 1);
        let renewal =
            renew(date(2024, 1, 1), date(2024, 3, 1), RenewalMode::Same, today).unwrap();

        assert_eq!(renewal.applied, ValidityPeriod::OneMonth);
        assert_eq!(renewal.new_expiry_date, date(2024, 4, 1));
    }

    #[test]
    fn test_month_end_clamps() {
        assert_eq!(add_months(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 2, 29), 12).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_add_months_out_of_range() {
        let result = add_months(NaiveDate::MAX, 1);
        assert!(matches!(result, Err(Error::DateOutOfRange { .. })));
    }

    #[test]
    fn test_renewal_mode_parsing() {
        assert_eq!("same".parse::<RenewalMode>().unwrap(), RenewalMode::Same);
        assert_eq!(" 1_year ".parse::<RenewalMode>().unwrap(), RenewalMode::OneYear);
        assert!(matches!(
            "2_weeks".parse::<RenewalMode>(),
            Err(Error::InvalidRenewalMode { .. })
        ));
        assert!(matches!(
            "".parse::<RenewalMode>(),
            Err(Error::InvalidRenewalMode { .. })
        ));
    }

    #[test]
    fn test_expiry_for_validity() {
        let buy = date(2024, 8, 31);
        assert_eq!(
            expiry_for_validity(buy, ValidityPeriod::SixMonths).unwrap(),
            Some(date(2025, 2, 28))
        );
        assert_eq!(
            expiry_for_validity(buy, ValidityPeriod::OneYear).unwrap(),
            Some(date(2025, 8, 31))
        );
        assert_eq!(expiry_for_validity(buy, ValidityPeriod::Custom).unwrap(), None);
    }
}

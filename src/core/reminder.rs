//! Renewal reminder selection and message formatting.
//!
//! Splits a subscription snapshot into "expiring soon" and "recently expired"
//! lists for the reminder view, and renders the text a user can forward to a
//! customer. Delivery itself is left to the caller.

use crate::{core::lifecycle::days_until, entities::subscription};
use chrono::NaiveDate;
use serde::Serialize;

/// A subscription paired with its signed day count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertItem {
    /// The subscription
    pub subscription: subscription::Model,
    /// Days until expiry; negative when overdue
    pub days_remaining: i64,
}

/// Reminder lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alerts {
    /// Expiring after today and within the lookahead, soonest first
    pub expiring: Vec<AlertItem>,
    /// Already expired, most recently expired first
    pub expired: Vec<AlertItem>,
}

impl Alerts {
    /// True when there is nothing to remind about
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiring.is_empty() && self.expired.is_empty()
    }
}

/// How pressing an upcoming expiry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Urgency {
    /// Within the urgent threshold
    Urgent,
    /// Further out
    Upcoming,
}

impl Urgency {
    /// Classifies a day count against the urgent threshold (inclusive).
    #[must_use]
    pub const fn from_days(days_remaining: i64, urgent_days: i64) -> Self {
        if days_remaining <= urgent_days {
            Self::Urgent
        } else {
            Self::Upcoming
        }
    }

    /// Badge text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "URGENT",
            Self::Upcoming => "EXPIRING",
        }
    }
}

/// Partitions subscriptions into expiring and expired reminder lists.
///
/// Dismissed subscriptions are skipped. A subscription expiring today is in
/// neither list: it is still active and not strictly after today.
#[must_use]
pub fn partition_alerts(
    subscriptions: &[subscription::Model],
    today: NaiveDate,
    lookahead_days: i64,
) -> Alerts {
    let mut alerts = Alerts::default();

    for sub in subscriptions.iter().filter(|s| !s.notification_dismissed) {
        let days_remaining = days_until(today, sub.expiry_date);
        let item = AlertItem {
            subscription: sub.clone(),
            days_remaining,
        };

        if days_remaining > 0 && days_remaining <= lookahead_days {
            alerts.expiring.push(item);
        } else if days_remaining < 0 {
            alerts.expired.push(item);
        }
    }

    alerts.expiring.sort_by_key(|item| item.days_remaining);
    alerts
        .expired
        .sort_by_key(|item| std::cmp::Reverse(item.days_remaining));
    alerts
}

/// Formats an amount without trailing zeros for whole values (`649`, `1499.5`).
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{amount:.2}");
    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => formatted.trim_end_matches('0').to_string(),
    }
}

/// Renders the reminder text sent to a customer.
#[must_use]
pub fn format_reminder_message(sub: &subscription::Model, currency_symbol: &str) -> String {
    format!(
        "Hi {}, your {} subscription is expiring on {}. Amount: {}{}",
        sub.customer_name,
        sub.subscription_name,
        sub.expiry_date.format("%d %b %Y"),
        currency_symbol,
        format_amount(sub.amount)
    )
}

/// One-line summary for a reminder list entry.
#[must_use]
pub fn format_alert_line(item: &AlertItem, urgent_days: i64) -> String {
    let sub = &item.subscription;
    if item.days_remaining < 0 {
        format!(
            "#{} {} ({}) - expired {} days ago",
            sub.id,
            sub.subscription_name,
            sub.customer_name,
            item.days_remaining.abs()
        )
    } else {
        format!(
            "[{}] #{} {} ({}) - expires in {} days",
            Urgency::from_days(item.days_remaining, urgent_days).as_str(),
            sub.id,
            sub.subscription_name,
            sub.customer_name,
            item.days_remaining
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::subscription_model;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_partition_alerts() {
        let today = date(2024, 3, 10);
        let buy = date(2024, 1, 1);
        let mut dismissed = subscription_model(5, "Hotstar", 299.0, buy, date(2024, 3, 12));
        dismissed.notification_dismissed = true;

        let subs = vec![
            subscription_model(1, "Netflix", 199.0, buy, date(2024, 3, 15)),
            subscription_model(2, "Spotify", 119.0, buy, date(2024, 3, 11)),
            subscription_model(3, "Zee5", 99.0, buy, date(2024, 3, 1)),
            subscription_model(4, "SonyLiv", 99.0, buy, date(2024, 3, 9)),
            dismissed,
            subscription_model(6, "Prime Video", 299.0, buy, today),
            subscription_model(7, "Netflix", 199.0, buy, date(2024, 4, 30)),
        ];

        let alerts = partition_alerts(&subs, today, 7);

        let expiring: Vec<i64> = alerts.expiring.iter().map(|a| a.subscription.id).collect();
        assert_eq!(expiring, vec![2, 1]);
        assert_eq!(alerts.expiring[0].days_remaining, 1);

        let expired: Vec<i64> = alerts.expired.iter().map(|a| a.subscription.id).collect();
        assert_eq!(expired, vec![4, 3]);
        assert_eq!(alerts.expired[1].days_remaining, -9);
    }

    #[test]
    fn test_partition_alerts_empty() {
        assert!(partition_alerts(&[], date(2024, 1, 1), 7).is_empty());
    }

    #[test]
    fn test_urgency_threshold() {
        assert_eq!(Urgency::from_days(7, 7), Urgency::Urgent);
        assert_eq!(Urgency::from_days(8, 7), Urgency::Upcoming);
        assert_eq!(Urgency::from_days(0, 7).as_str(), "URGENT");
    }

    #[test]
    fn test_format_reminder_message() {
        let mut sub = subscription_model(1, "Netflix", 649.0, date(2024, 1, 1), date(2024, 2, 5));
        sub.customer_name = "Asha".to_string();

        assert_eq!(
            format_reminder_message(&sub, "₹"),
            "Hi Asha, your Netflix subscription is expiring on 05 Feb 2024. Amount: ₹649"
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1499.5), "1499.5");
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(0.25), "0.25");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_format_alert_line() {
        let buy = date(2024, 1, 1);
        let item = AlertItem {
            subscription: subscription_model(9, "Spotify", 119.0, buy, date(2024, 3, 4)),
            days_remaining: 3,
        };
        let line = format_alert_line(&item, 7);
        assert!(line.starts_with("[URGENT] #9 Spotify"));
        assert!(line.ends_with("expires in 3 days"));

        let overdue = AlertItem {
            days_remaining: -4,
            ..item
        };
        assert!(format_alert_line(&overdue, 7).ends_with("expired 4 days ago"));
    }
}

//! Formatting and input helpers shared by the subscription commands.

use crate::{
    core::{
        lifecycle::{LifecycleSummary, Status, days_overdue},
        reminder::format_amount,
        validation::ValidationErrors,
    },
    entities::subscription,
};
use chrono::{Local, NaiveDate};

/// Maximum entries listed in a single reply before summarising the rest
pub const MAX_LISTED: usize = 20;

/// Today's date in the bot's local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a user-typed date. Accepts `YYYY-MM-DD` and `DD/MM/YYYY`.
#[must_use]
pub fn parse_date_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// Status badge for list output.
#[must_use]
pub const fn status_emoji(status: Status) -> &'static str {
    match status {
        Status::Active => "🟢",
        Status::Expired => "🔴",
    }
}

/// "1 subscription" / "3 subscriptions"
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Reply listing every field error of a rejected form or edit.
#[must_use]
pub fn validation_reply(errors: &ValidationErrors) -> String {
    errors.iter().fold(
        String::from("❌ **Please fix the following:**\n"),
        |mut reply, (field, message)| {
            reply.push_str(&format!("• `{field}`: {message}\n"));
            reply
        },
    )
}

/// One-line summary of a subscription for list output.
#[must_use]
pub fn format_subscription_line(
    sub: &subscription::Model,
    today: NaiveDate,
    currency_symbol: &str,
) -> String {
    let summary = LifecycleSummary::for_subscription(sub, today);
    let timing = match summary.status {
        Status::Active => format!("expires {} ({}d left)", sub.expiry_date, summary.days_remaining),
        Status::Expired => format!(
            "expired {} ({}d ago)",
            sub.expiry_date,
            days_overdue(today, sub.expiry_date)
        ),
    };

    format!(
        "{} **#{}** {} - {} | {}{} | {} | {}",
        status_emoji(summary.status),
        sub.id,
        sub.subscription_name,
        sub.customer_name,
        currency_symbol,
        format_amount(sub.amount),
        summary.validity,
        timing
    )
}

//! Dashboard Discord commands - counts, revenue, renewal reminders and bulk dismissal.
//!
//! These commands fetch a snapshot of the caller's subscriptions and hand it to the
//! pure stats and reminder modules for aggregation.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::utils, handlers::autocomplete},
        core::{
            reminder::{format_alert_line, format_amount, partition_alerts},
            stats::{self, ReminderWindow},
            subscription,
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Number of expired entries shown before linking to the full list
    const EXPIRED_PREVIEW: usize = 5;
    /// Embed field values are capped at 1024 characters
    const UPCOMING_PREVIEW: usize = 10;

    /// Reminder window offered as a fixed choice.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum WindowChoice {
        #[name = "2 Days"]
        TwoDays,
        #[name = "7 Days"]
        SevenDays,
        #[name = "1 Month"]
        OneMonth,
    }

    impl From<WindowChoice> for ReminderWindow {
        fn from(value: WindowChoice) -> Self {
            match value {
                WindowChoice::TwoDays => Self::TwoDays,
                WindowChoice::SevenDays => Self::SevenDays,
                WindowChoice::OneMonth => Self::OneMonth,
            }
        }
    }

    /// Shows total, active and expired counts plus upcoming expirations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "How far ahead to look for expirations"] window: Option<WindowChoice>,
    ) -> Result<()> {
        use poise::serenity_prelude as serenity;

        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let today = utils::today();

        let window = window.map_or(data.settings.default_window, ReminderWindow::from);
        let window_end = window.end_date(today)?;

        let subs = subscription::list_subscriptions(&data.database, &user_id).await?;
        let counts = stats::aggregate(&subs, today, window_end);

        let upcoming = stats::upcoming_in_window(&subs, today, window_end);
        let hidden = counts.in_window.saturating_sub(upcoming.len());

        let mut upcoming_text = String::new();
        if upcoming.is_empty() {
            write!(
                &mut upcoming_text,
                "No upcoming expirations in {}",
                window.describe()
            )?;
        } else {
            for sub in upcoming.iter().take(UPCOMING_PREVIEW) {
                writeln!(
                    &mut upcoming_text,
                    "• **#{}** {} ({}) - expires on {}",
                    sub.id,
                    sub.subscription_name,
                    sub.customer_name,
                    sub.expiry_date.format("%b %d, %Y")
                )?;
            }
            if upcoming.len() > UPCOMING_PREVIEW {
                writeln!(
                    &mut upcoming_text,
                    "_…and {} more_",
                    upcoming.len() - UPCOMING_PREVIEW
                )?;
            }
        }
        if hidden > 0 {
            write!(&mut upcoming_text, "\n🔕 {hidden} dismissed")?;
        }

        let embed = serenity::CreateEmbed::default()
            .title("📊 Subscription Dashboard")
            .description(format!("As of {today} | window: {}", window.describe()))
            .color(0x0034_98DB)
            .field("Total", counts.total.to_string(), true)
            .field("Active", counts.active.to_string(), true)
            .field("Expired", counts.expired.to_string(), true)
            .field("Expiring in window", counts.in_window.to_string(), true)
            .field("Upcoming", upcoming_text, false);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows buyers and revenue, optionally for a single service.
    #[poise::command(slash_command, prefix_command)]
    pub async fn revenue(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this service"]
        #[autocomplete = "autocomplete::autocomplete_service"]
        service: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let currency = &data.settings.currency_symbol;

        let subs = subscription::list_subscriptions(&data.database, &user_id).await?;
        let analysis = stats::analyze(&subs, utils::today(), service.as_deref());

        let mut response = format!(
            "💹 **Revenue Analysis** ({})\n\n",
            service.as_deref().unwrap_or("All services")
        );
        writeln!(&mut response, "👥 Total Buyers: {}", analysis.total_buyers)?;
        writeln!(
            &mut response,
            "💰 Total Revenue: {currency}{}",
            format_amount(analysis.total_revenue)
        )?;
        writeln!(&mut response, "🟢 Active: {}", analysis.active)?;
        writeln!(&mut response, "🔴 Expired: {}", analysis.expired)?;

        if service.is_none() && !subs.is_empty() {
            response.push_str("\n**By service:**\n");
            for (name, total) in stats::revenue_by_service(&subs) {
                writeln!(&mut response, "• {name}: {currency}{}", format_amount(total))?;
            }
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Hides every reminder for subscriptions expiring in the window at once.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dismiss_all(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Window to clear, defaults to the dashboard window"]
        window: Option<WindowChoice>,
    ) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let today = utils::today();

        let window = window.map_or(data.settings.default_window, ReminderWindow::from);
        let window_end = window.end_date(today)?;

        let hidden =
            subscription::dismiss_in_window(&data.database, &user_id, today, window_end).await?;
        info!("User {} dismissed {} reminders ({})", user_id, hidden, window);

        let message = if hidden == 0 {
            format!("🔔 No reminders to clear in the {}.", window.describe())
        } else {
            format!(
                "🔕 Cleared {} in the {}.",
                utils::pluralize(usize::try_from(hidden).unwrap_or(usize::MAX), "reminder"),
                window.describe()
            )
        };
        ctx.say(message).await?;
        Ok(())
    }

    /// Lists subscriptions expiring soon and those that recently expired.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reminders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let user_id = ctx.author().id.to_string();
        let settings = &data.settings;

        let subs = subscription::list_subscriptions(&data.database, &user_id).await?;
        let alerts = partition_alerts(&subs, utils::today(), settings.alert_lookahead_days);

        if alerts.is_empty() {
            ctx.say("🔔 You don't have any subscriptions expiring soon or recently expired.")
                .await?;
            return Ok(());
        }

        let mut response = String::new();
        if !alerts.expiring.is_empty() {
            response.push_str("⏰ **Subscriptions Expiring Soon**\n");
            for item in &alerts.expiring {
                writeln!(&mut response, "• {}", format_alert_line(item, settings.urgent_days))?;
            }
            response.push('\n');
        }

        if !alerts.expired.is_empty() {
            response.push_str("⚠️ **Subscriptions Expired**\n");
            for item in alerts.expired.iter().take(EXPIRED_PREVIEW) {
                writeln!(&mut response, "• {}", format_alert_line(item, settings.urgent_days))?;
            }
            if alerts.expired.len() > EXPIRED_PREVIEW {
                writeln!(
                    &mut response,
                    "_View all expired ({}) with `/subscriptions status:Expired`_",
                    alerts.expired.len()
                )?;
            }
        }

        response.push_str(
            "\nUse `/renew` to renew, `/dismiss` to hide a reminder or `/dismiss_all` to clear them.",
        );
        ctx.say(response).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Subscription Discord commands - add, list, inspect, edit, renew, delete and dismiss.
//!
//! Every command is scoped to the invoking Discord user: the author's ID is the
//! owner ID passed to the persistence layer.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::utils::{self, MAX_LISTED},
            handlers::autocomplete,
        },
        core::{
            lifecycle::{LifecycleSummary, Status, ValidityPeriod, days_overdue},
            reminder::{format_amount, format_reminder_message},
            renewal::{RenewalMode, expiry_for_validity},
            subscription::{self, ListFilter, parse_validity_filter},
            validation::{SubscriptionEdit, SubscriptionForm, validate, validate_edit},
        },
        errors::{Error, Result},
    };
    use std::fmt::Write;
    use tracing::info;

    /// Status filter offered as a fixed choice.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "Active"]
        Active,
        #[name = "Expired"]
        Expired,
    }

    impl From<StatusChoice> for Status {
        fn from(value: StatusChoice) -> Self {
            match value {
                StatusChoice::Active => Self::Active,
                StatusChoice::Expired => Self::Expired,
            }
        }
    }

    /// Records a new customer subscription.
    ///
    /// The expiry date is derived from the validity selection unless the validity is
    /// `custom`, in which case it must be given explicitly.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_subscription(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Customer name"] customer_name: String,
        #[description = "10-digit phone number"] phone_number: String,
        #[description = "Service name (or 'custom')"]
        #[autocomplete = "autocomplete::autocomplete_service"]
        service: String,
        #[description = "Amount, e.g. 649 or ₹1,499"] amount: String,
        #[description = "Validity: 1_month, 3_months, 6_months, 1_year or custom"]
        #[autocomplete = "autocomplete::autocomplete_validity"]
        validity: String,
        #[description = "Purchase date (YYYY-MM-DD), defaults to today"] buy_date: Option<String>,
        #[description = "Expiry date (YYYY-MM-DD), required for custom validity"]
        expiry_date: Option<String>,
        #[description = "Customer email"] email: Option<String>,
        #[description = "Service name when service is 'custom'"] custom_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let buy_date = match buy_date.as_deref() {
            None => Some(utils::today()),
            Some(raw) => utils::parse_date_input(raw),
        };
        let explicit_expiry = expiry_date.as_deref().and_then(utils::parse_date_input);
        if buy_date.is_none() || (expiry_date.is_some() && explicit_expiry.is_none()) {
            ctx.say("❌ Dates must be written as YYYY-MM-DD or DD/MM/YYYY.")
                .await?;
            return Ok(());
        }

        // Picking a named validity fills in the expiry, like the form's dropdown
        let derived_expiry = match (buy_date, validity.parse::<ValidityPeriod>()) {
            (Some(buy), Ok(period)) if explicit_expiry.is_none() => {
                expiry_for_validity(buy, period)?
            }
            _ => None,
        };

        let form = SubscriptionForm {
            customer_name,
            phone_number,
            customer_email: email,
            subscription_name: service,
            custom_subscription_name: custom_name,
            amount,
            validity,
            buy_date,
            expiry_date: explicit_expiry.or(derived_expiry),
        };

        let errors = validate(&form);
        if !errors.is_empty() {
            ctx.say(utils::validation_reply(&errors)).await?;
            return Ok(());
        }

        let created =
            subscription::insert_subscription(db, &user_id, form.into_new_subscription()?).await?;
        info!(
            "User {} added subscription #{} ({})",
            user_id, created.id, created.subscription_name
        );

        let currency = &ctx.data().settings.currency_symbol;
        ctx.say(format!(
            "✅ Added **#{}** {} for {} | {}{} | {} → {}",
            created.id,
            created.subscription_name,
            created.customer_name,
            currency,
            format_amount(created.amount),
            created.buy_date,
            created.expiry_date
        ))
        .await?;
        Ok(())
    }

    /// Lists your subscriptions, newest purchase first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn subscriptions(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only active or expired"] status: Option<StatusChoice>,
        #[description = "Only this validity period"]
        #[autocomplete = "autocomplete::autocomplete_validity_filter"]
        validity: Option<String>,
        #[description = "Only this service"]
        #[autocomplete = "autocomplete::autocomplete_service"]
        service: Option<String>,
        #[description = "Search service, customer or phone"] search: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let today = utils::today();

        let filter = ListFilter {
            status: status.map(Status::from),
            validity: validity.as_deref().map(parse_validity_filter).transpose()?,
            service,
            query: search,
        };

        let all = subscription::list_subscriptions(db, &user_id).await?;
        let matching = filter.apply(&all, today);

        if matching.is_empty() {
            ctx.say("📂 No subscriptions found. Add one with `/add_subscription`!")
                .await?;
            return Ok(());
        }

        let currency = &ctx.data().settings.currency_symbol;
        let mut response = format!(
            "📂 **Subscriptions** ({})\n\n",
            utils::pluralize(matching.len(), "subscription")
        );
        for sub in matching.iter().take(MAX_LISTED) {
            writeln!(
                &mut response,
                "{}",
                utils::format_subscription_line(sub, today, currency)
            )?;
        }
        if matching.len() > MAX_LISTED {
            writeln!(
                &mut response,
                "\n_…and {} more. Narrow the list with filters._",
                matching.len() - MAX_LISTED
            )?;
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows details and the reminder text for one subscription.
    #[poise::command(slash_command, prefix_command)]
    pub async fn subscription_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subscription ID"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let settings = &ctx.data().settings;
        let today = utils::today();

        let Some(sub) = subscription::get_subscription(db, &user_id, id).await? else {
            ctx.say(format!("❌ Subscription #{id} not found.")).await?;
            return Ok(());
        };

        let summary = LifecycleSummary::for_subscription(&sub, today);
        let mut response = format!("📋 **#{} {}**\n\n", sub.id, sub.subscription_name);
        writeln!(&mut response, "👤 Customer: {}", sub.customer_name)?;
        writeln!(&mut response, "📞 Phone: {}", sub.phone_number)?;
        if let Some(email) = &sub.customer_email {
            writeln!(&mut response, "✉️ Email: {email}")?;
        }
        writeln!(
            &mut response,
            "💰 Amount: {}{}",
            settings.currency_symbol,
            format_amount(sub.amount)
        )?;
        writeln!(
            &mut response,
            "📅 {} → {} ({})",
            sub.buy_date, sub.expiry_date, summary.validity
        )?;
        match summary.status {
            Status::Active => writeln!(
                &mut response,
                "{} Active, {} days remaining",
                utils::status_emoji(summary.status),
                summary.days_remaining
            )?,
            Status::Expired => writeln!(
                &mut response,
                "{} Expired {} days ago",
                utils::status_emoji(summary.status),
                days_overdue(today, sub.expiry_date)
            )?,
        }
        if sub.notification_dismissed {
            writeln!(&mut response, "🔕 Reminders dismissed")?;
        }
        writeln!(
            &mut response,
            "\n**Reminder text:**\n> {}",
            format_reminder_message(&sub, &settings.currency_symbol)
        )?;

        ctx.say(response).await?;
        Ok(())
    }

    /// Changes customer details, the amount or the dates of a subscription.
    ///
    /// Only the options you pass are changed; pass an empty email to clear it.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, prefix_command)]
    pub async fn edit_subscription(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subscription ID"] id: i64,
        #[description = "New customer name"] customer_name: Option<String>,
        #[description = "New 10-digit phone number"] phone_number: Option<String>,
        #[description = "New email (blank clears it)"] email: Option<String>,
        #[description = "New service name"]
        #[autocomplete = "autocomplete::autocomplete_service"]
        service: Option<String>,
        #[description = "New amount, e.g. 649 or ₹1,499"] amount: Option<String>,
        #[description = "New purchase date (YYYY-MM-DD)"] buy_date: Option<String>,
        #[description = "New expiry date (YYYY-MM-DD)"] expiry_date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let today = utils::today();

        let new_buy = buy_date.as_deref().map(utils::parse_date_input);
        let new_expiry = expiry_date.as_deref().map(utils::parse_date_input);
        if matches!(new_buy, Some(None)) || matches!(new_expiry, Some(None)) {
            ctx.say("❌ Dates must be written as YYYY-MM-DD or DD/MM/YYYY.")
                .await?;
            return Ok(());
        }

        let edit = SubscriptionEdit {
            customer_name,
            phone_number,
            customer_email: email,
            subscription_name: service,
            amount,
            buy_date: new_buy.flatten(),
            expiry_date: new_expiry.flatten(),
        };
        if edit.is_empty() {
            ctx.say("ℹ️ Nothing to change. Pass at least one field to edit.")
                .await?;
            return Ok(());
        }

        let errors = validate_edit(&edit);
        if !errors.is_empty() {
            ctx.say(utils::validation_reply(&errors)).await?;
            return Ok(());
        }

        let updated =
            subscription::update_subscription(db, &user_id, id, edit.into_patch()?).await?;
        info!("User {} edited subscription #{}", user_id, id);

        ctx.say(format!(
            "✏️ Updated:\n{}",
            utils::format_subscription_line(&updated, today, &ctx.data().settings.currency_symbol)
        ))
        .await?;
        Ok(())
    }

    /// Renews a subscription for the same or a new period.
    ///
    /// Active subscriptions are extended from their expiry date; expired ones restart today.
    #[poise::command(slash_command, prefix_command)]
    pub async fn renew(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subscription ID"] id: i64,
        #[description = "same, 1_month, 3_months, 6_months or 1_year"]
        #[autocomplete = "autocomplete::autocomplete_renewal_mode"]
        mode: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        let mode: RenewalMode = mode.parse()?;
        let (updated, renewal) =
            subscription::apply_renewal(db, &user_id, id, mode, utils::today()).await?;
        info!("User {} renewed subscription #{} ({})", user_id, id, mode);

        let how = if renewal.was_expired {
            "restarted from today"
        } else {
            "extended"
        };
        ctx.say(format!(
            "🔄 **#{}** {} {} for {}. New period: {} → {}",
            updated.id,
            updated.subscription_name,
            how,
            renewal.applied,
            renewal.new_buy_date,
            renewal.new_expiry_date
        ))
        .await?;
        Ok(())
    }

    /// Permanently deletes a subscription.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_subscription(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subscription ID"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();

        subscription::delete_subscription(db, &user_id, id).await?;
        info!("User {} deleted subscription #{}", user_id, id);

        ctx.say(format!("🗑️ Subscription #{id} deleted.")).await?;
        Ok(())
    }

    /// Hides a subscription from reminders, or shows it again.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dismiss(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Subscription ID"] id: i64,
        #[description = "Show reminders again instead"] restore: Option<bool>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let user_id = ctx.author().id.to_string();
        let dismissed = !restore.unwrap_or(false);

        let updated = subscription::set_dismissed(db, &user_id, id, dismissed).await?;
        let message = if updated.notification_dismissed {
            format!("🔕 Reminders for #{id} dismissed.")
        } else {
            format!("🔔 Reminders for #{id} restored.")
        };

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

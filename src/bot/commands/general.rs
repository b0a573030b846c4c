//! General Discord commands - ping and help.
//! Simple commands that don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**SubTrack Help**\n\
        Here is a summary of all available commands.\n\n\
        **Subscriptions**\n\
        • `/add_subscription <customer> <phone> <service> <amount> <validity> [buy_date] [expiry_date] [email] [custom_name]` - Records a subscription.\n\
        • `/subscriptions [status] [validity] [service] [search]` - Lists your subscriptions.\n\
        • `/subscription_info <id>` - Shows details and the reminder text.\n\
        • `/edit_subscription <id> [customer_name] [phone_number] [email] [service] [amount] [buy_date] [expiry_date]` - Changes the given fields.\n\
        • `/renew <id> <mode>` - Renews for `same`, `1_month`, `3_months`, `6_months` or `1_year`.\n\
        • `/delete_subscription <id>` - Deletes a subscription.\n\
        • `/dismiss <id> [restore]` - Hides a subscription from reminders.\n\
        • `/dismiss_all [window]` - Hides every reminder expiring in the window.\n\n\
        **Overview**\n\
        • `/dashboard [window]` - Active/expired counts and upcoming expirations.\n\
        • `/revenue [service]` - Buyers and revenue totals.\n\
        • `/reminders` - Subscriptions expiring soon or recently expired.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

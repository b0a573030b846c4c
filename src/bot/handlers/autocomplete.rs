//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests service names (configured vocabulary plus names already used by the
//! caller), validity codes and renewal modes as the user types. List filters only
//! offer the validity periods a stored subscription can be inferred as.

use crate::{
    bot::BotData,
    core::{lifecycle::ValidityPeriod, renewal::RenewalMode, subscription},
    errors::Error,
};

/// Discord caps autocomplete responses at 25 entries
const MAX_SUGGESTIONS: usize = 25;

fn filter_matching<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests service names: the configured list followed by the caller's own custom names.
pub async fn autocomplete_service(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();
    let user_id = ctx.author().id.to_string();

    let mut names = data.settings.services.clone();
    if let Ok(existing) = subscription::list_subscriptions(&data.database, &user_id).await {
        for sub in existing {
            if !names.contains(&sub.subscription_name) {
                names.push(sub.subscription_name);
            }
        }
    }

    filter_matching(names, partial)
}

/// Suggests validity codes.
pub async fn autocomplete_validity(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_matching(
        ValidityPeriod::ALL.iter().map(|v| v.as_str().to_string()),
        partial,
    )
}

/// Suggests validity codes that stored subscriptions can be filtered by.
pub async fn autocomplete_validity_filter(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_matching(
        ValidityPeriod::INFERRED.iter().map(|v| v.as_str().to_string()),
        partial,
    )
}

/// Suggests renewal mode codes.
pub async fn autocomplete_renewal_mode(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_matching(
        RenewalMode::ALL.iter().map(|m| m.as_str().to_string()),
        partial,
    )
}

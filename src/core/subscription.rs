//! Subscription persistence - list, insert, update and delete subscriptions.
//!
//! Every operation is scoped by the owning user ID: a record belonging to another
//! owner behaves exactly like a missing one. Concurrent edits are last-writer-wins.

use crate::{
    core::{
        lifecycle::{Status, ValidityPeriod, classify_status, infer_validity_label},
        renewal::{Renewal, RenewalMode, renew},
    },
    entities::{Subscription, subscription},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use serde::{Deserialize, Serialize};

/// A validated record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    /// Customer's name
    pub customer_name: String,
    /// Optional contact email
    pub customer_email: Option<String>,
    /// Contact phone number
    pub phone_number: String,
    /// Service label
    pub subscription_name: String,
    /// Amount for one period
    pub amount: f64,
    /// First day of the period
    pub buy_date: NaiveDate,
    /// Last day of the period
    pub expiry_date: NaiveDate,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPatch {
    /// New customer name
    pub customer_name: Option<String>,
    /// New email; `Some(None)` clears it
    pub customer_email: Option<Option<String>>,
    /// New phone number
    pub phone_number: Option<String>,
    /// New service label
    pub subscription_name: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New purchase date
    pub buy_date: Option<NaiveDate>,
    /// New expiry date
    pub expiry_date: Option<NaiveDate>,
    /// New dismissed flag
    pub notification_dismissed: Option<bool>,
}

fn check_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("{field}: cannot be empty"),
        });
    }
    Ok(())
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::Validation {
            message: format!("amount: {amount} is not a finite number"),
        });
    }
    Ok(())
}

fn check_dates(buy_date: NaiveDate, expiry_date: NaiveDate) -> Result<()> {
    if expiry_date < buy_date {
        return Err(Error::Validation {
            message: format!("expiryDate: {expiry_date} is before purchase date {buy_date}"),
        });
    }
    Ok(())
}

/// Retrieves all subscriptions for an owner, most recently purchased first.
pub async fn list_subscriptions<C>(db: &C, user_id: &str) -> Result<Vec<subscription::Model>>
where
    C: ConnectionTrait,
{
    Subscription::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .order_by_desc(subscription::Column::BuyDate)
        .order_by_desc(subscription::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds one subscription by ID, returning `None` if missing or owned by someone else.
pub async fn get_subscription<C>(
    db: &C,
    user_id: &str,
    id: i64,
) -> Result<Option<subscription::Model>>
where
    C: ConnectionTrait,
{
    Subscription::find_by_id(id)
        .filter(subscription::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_subscription<C>(db: &C, user_id: &str, id: i64) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    get_subscription(db, user_id, id)
        .await?
        .ok_or(Error::SubscriptionNotFound { id })
}

/// Inserts a new subscription for an owner.
///
/// Rejects empty customer/service names, non-finite amounts and an expiry date
/// before the purchase date.
pub async fn insert_subscription<C>(
    db: &C,
    user_id: &str,
    new: NewSubscription,
) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    check_name("customerName", &new.customer_name)?;
    check_name("subscriptionName", &new.subscription_name)?;
    check_amount(new.amount)?;
    check_dates(new.buy_date, new.expiry_date)?;

    let model = subscription::ActiveModel {
        user_id: Set(user_id.to_string()),
        customer_name: Set(new.customer_name.trim().to_string()),
        customer_email: Set(new.customer_email),
        phone_number: Set(new.phone_number),
        subscription_name: Set(new.subscription_name.trim().to_string()),
        amount: Set(new.amount),
        buy_date: Set(new.buy_date),
        expiry_date: Set(new.expiry_date),
        notification_dismissed: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    tracing::debug!(id = inserted.id, user_id, "Inserted subscription");
    Ok(inserted)
}

/// Applies a partial update. The date invariant is checked on the merged record.
///
/// Names are trimmed and must stay non-empty; the amount must be finite.
pub async fn update_subscription<C>(
    db: &C,
    user_id: &str,
    id: i64,
    patch: SubscriptionPatch,
) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    let existing = require_subscription(db, user_id, id).await?;

    if let Some(name) = &patch.customer_name {
        check_name("customerName", name)?;
    }
    if let Some(name) = &patch.subscription_name {
        check_name("subscriptionName", name)?;
    }
    if let Some(amount) = patch.amount {
        check_amount(amount)?;
    }
    let buy_date = patch.buy_date.unwrap_or(existing.buy_date);
    let expiry_date = patch.expiry_date.unwrap_or(existing.expiry_date);
    check_dates(buy_date, expiry_date)?;

    let mut active: subscription::ActiveModel = existing.into();
    if let Some(name) = patch.customer_name {
        active.customer_name = Set(name.trim().to_string());
    }
    if let Some(email) = patch.customer_email {
        active.customer_email = Set(email);
    }
    if let Some(phone) = patch.phone_number {
        active.phone_number = Set(phone);
    }
    if let Some(name) = patch.subscription_name {
        active.subscription_name = Set(name.trim().to_string());
    }
    if let Some(amount) = patch.amount {
        active.amount = Set(amount);
    }
    if let Some(dismissed) = patch.notification_dismissed {
        active.notification_dismissed = Set(dismissed);
    }
    active.buy_date = Set(buy_date);
    active.expiry_date = Set(expiry_date);

    let updated = active.update(db).await?;
    tracing::debug!(id, user_id, "Updated subscription");
    Ok(updated)
}

/// Permanently deletes a subscription.
pub async fn delete_subscription<C>(db: &C, user_id: &str, id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let result = Subscription::delete_many()
        .filter(subscription::Column::Id.eq(id))
        .filter(subscription::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::SubscriptionNotFound { id });
    }
    tracing::debug!(id, user_id, "Deleted subscription");
    Ok(())
}

/// Sets or clears the flag that hides a subscription from reminder lists.
pub async fn set_dismissed<C>(
    db: &C,
    user_id: &str,
    id: i64,
    dismissed: bool,
) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    update_subscription(
        db,
        user_id,
        id,
        SubscriptionPatch {
            notification_dismissed: Some(dismissed),
            ..Default::default()
        },
    )
    .await
}

/// Dismisses every still-visible subscription expiring inside `[today, window_end]`.
///
/// Returns the number of records that were hidden.
pub async fn dismiss_in_window<C>(
    db: &C,
    user_id: &str,
    today: NaiveDate,
    window_end: NaiveDate,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = Subscription::update_many()
        .col_expr(subscription::Column::NotificationDismissed, Expr::value(true))
        .filter(subscription::Column::UserId.eq(user_id))
        .filter(subscription::Column::NotificationDismissed.eq(false))
        .filter(subscription::Column::ExpiryDate.between(today, window_end))
        .exec(db)
        .await?;

    tracing::debug!(user_id, rows = result.rows_affected, "Dismissed reminders in window");
    Ok(result.rows_affected)
}

/// Renews a subscription and persists the new dates.
///
/// Returns the updated record together with the computed [`Renewal`].
pub async fn apply_renewal<C>(
    db: &C,
    user_id: &str,
    id: i64,
    mode: RenewalMode,
    today: NaiveDate,
) -> Result<(subscription::Model, Renewal)>
where
    C: ConnectionTrait,
{
    let existing = require_subscription(db, user_id, id).await?;
    let renewal = renew(existing.buy_date, existing.expiry_date, mode, today)?;

    let mut active: subscription::ActiveModel = existing.into();
    active.buy_date = Set(renewal.new_buy_date);
    active.expiry_date = Set(renewal.new_expiry_date);
    let updated = active.update(db).await?;

    tracing::debug!(
        id,
        mode = %mode,
        new_expiry = %renewal.new_expiry_date,
        "Renewed subscription"
    );
    Ok((updated, renewal))
}

/// Criteria for narrowing an in-memory subscription list.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Only this status
    pub status: Option<Status>,
    /// Only this inferred validity; never [`ValidityPeriod::Custom`], see [`parse_validity_filter`]
    pub validity: Option<ValidityPeriod>,
    /// Only this service name
    pub service: Option<String>,
    /// Free-text search on service, customer name and phone
    pub query: Option<String>,
}

impl ListFilter {
    fn matches_attributes(&self, sub: &subscription::Model, today: NaiveDate) -> bool {
        self.status
            .is_none_or(|status| classify_status(today, sub.expiry_date) == status)
            && self.validity.is_none_or(|validity| {
                infer_validity_label(sub.buy_date, sub.expiry_date) == validity
            })
            && self
                .service
                .as_deref()
                .is_none_or(|service| sub.subscription_name == service)
    }

    /// Applies the filter, keeping the input order.
    #[must_use]
    pub fn apply<'a>(
        &self,
        subscriptions: &'a [subscription::Model],
        today: NaiveDate,
    ) -> Vec<&'a subscription::Model> {
        let candidates = match self.query.as_deref() {
            Some(query) => search_subscriptions(subscriptions, query),
            None => subscriptions.iter().collect(),
        };
        candidates
            .into_iter()
            .filter(|sub| self.matches_attributes(sub, today))
            .collect()
    }
}

/// Parses a validity code for use as a list filter.
///
/// Stored records only ever carry an inferred period, so `custom` is rejected.
///
/// # Errors
/// [`Error::InvalidValidity`] for unknown codes, [`Error::Validation`] for `custom`.
pub fn parse_validity_filter(raw: &str) -> Result<ValidityPeriod> {
    match raw.parse::<ValidityPeriod>()? {
        ValidityPeriod::Custom => Err(Error::Validation {
            message: "validity: custom date ranges are not a stored period, \
                      filter by 1_month, 3_months, 6_months or 1_year"
                .to_string(),
        }),
        period => Ok(period),
    }
}

fn matches_search(sub: &subscription::Model, query: &str) -> bool {
    let query_lower = query.to_lowercase();
    sub.subscription_name.to_lowercase().contains(&query_lower)
        || sub.customer_name.to_lowercase().contains(&query_lower)
        || sub.phone_number.contains(query)
}

/// Case-insensitive search over service and customer names, substring match on phone.
#[must_use]
pub fn search_subscriptions<'a>(
    subscriptions: &'a [subscription::Model],
    query: &str,
) -> Vec<&'a subscription::Model> {
    subscriptions
        .iter()
        .filter(|sub| matches_search(sub, query))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{core::validation::SubscriptionEdit, test_utils::*};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_scoped_by_owner() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_subscription(&db, "owner_a", "Netflix", date(2024, 1, 1)).await?;
        create_test_subscription(&db, "owner_a", "Spotify", date(2024, 2, 1)).await?;
        create_test_subscription(&db, "owner_b", "Zee5", date(2024, 3, 1)).await?;

        let subs = list_subscriptions(&db, "owner_a").await?;
        assert_eq!(subs.len(), 2);
        // Most recently purchased first
        assert_eq!(subs[0].subscription_name, "Spotify");
        assert_eq!(subs[1].subscription_name, "Netflix");
        assert!(subs.iter().all(|s| !s.notification_dismissed));

        assert!(list_subscriptions(&db, "nobody").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_rejects_expiry_before_buy() -> Result<()> {
        let db = setup_test_db().await?;
        let new = NewSubscription {
            expiry_date: date(2023, 12, 31),
            ..new_test_subscription("Netflix", date(2024, 1, 1))
        };

        let result = insert_subscription(&db, "owner", new).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(list_subscriptions(&db, "owner").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;
        let new = NewSubscription {
            subscription_name: "   ".to_string(),
            ..new_test_subscription("Netflix", date(2024, 1, 1))
        };

        let result = insert_subscription(&db, "owner", new).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_subscription_other_owner_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner_a", "Netflix", date(2024, 1, 1)).await?;

        assert!(get_subscription(&db, "owner_a", sub.id).await?.is_some());
        assert!(get_subscription(&db, "owner_b", sub.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_subscription_partial() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        let updated = update_subscription(
            &db,
            "owner",
            sub.id,
            SubscriptionPatch {
                amount: Some(799.0),
                customer_email: Some(Some("new@example.com".to_string())),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.amount, 799.0);
        assert_eq!(updated.customer_email.as_deref(), Some("new@example.com"));
        assert_eq!(updated.customer_name, sub.customer_name);
        assert_eq!(updated.expiry_date, sub.expiry_date);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_checks_merged_dates() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        // Moving only the buy date past the stored expiry must fail
        let result = update_subscription(
            &db,
            "owner",
            sub.id,
            SubscriptionPatch {
                buy_date: Some(date(2024, 6, 1)),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_subscription() -> Result<()> {
        let db = setup_test_db().await?;
        let result = update_subscription(&db, "owner", 42, SubscriptionPatch::default()).await;
        assert!(matches!(result, Err(Error::SubscriptionNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_subscription() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        // Another owner cannot delete it
        let result = delete_subscription(&db, "intruder", sub.id).await;
        assert!(matches!(result, Err(Error::SubscriptionNotFound { .. })));

        delete_subscription(&db, "owner", sub.id).await?;
        assert!(get_subscription(&db, "owner", sub.id).await?.is_none());

        let again = delete_subscription(&db, "owner", sub.id).await;
        assert!(matches!(again, Err(Error::SubscriptionNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_dismissed() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        let dismissed = set_dismissed(&db, "owner", sub.id, true).await?;
        assert!(dismissed.notification_dismissed);

        let restored = set_dismissed(&db, "owner", sub.id, false).await?;
        assert!(!restored.notification_dismissed);
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_renewal_active() -> Result<()> {
        let db = setup_test_db().await?;
        // Bought 2024-01-01, expires 2024-02-01
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        let (updated, renewal) =
            apply_renewal(&db, "owner", sub.id, RenewalMode::OneMonth, date(2024, 1, 20)).await?;

        assert!(!renewal.was_expired);
        assert_eq!(updated.buy_date, date(2024, 1, 1));
        assert_eq!(updated.expiry_date, date(2024, 3, 1));

        let stored = get_subscription(&db, "owner", sub.id).await?.unwrap();
        assert_eq!(stored.expiry_date, date(2024, 3, 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_renewal_expired_restarts() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;
        let today = date(2024, 2, 11);

        let (updated, renewal) =
            apply_renewal(&db, "owner", sub.id, RenewalMode::Same, today).await?;

        assert!(renewal.was_expired);
        assert_eq!(updated.buy_date, today);
        assert_eq!(updated.expiry_date, date(2024, 3, 11));
        Ok(())
    }

    #[test]
    fn test_list_filter() {
        let today = date(2024, 3, 1);
        let subs = vec![
            subscription_model(1, "Netflix", 199.0, date(2024, 2, 1), date(2024, 3, 1)),
            subscription_model(2, "Spotify", 119.0, date(2023, 3, 1), date(2024, 3, 1)),
            subscription_model(3, "Netflix", 649.0, date(2023, 8, 1), date(2024, 2, 1)),
        ];

        let expired = ListFilter {
            status: Some(Status::Expired),
            ..Default::default()
        };
        let ids: Vec<i64> = expired.apply(&subs, today).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3]);

        let yearly = ListFilter {
            validity: Some(ValidityPeriod::OneYear),
            ..Default::default()
        };
        let ids: Vec<i64> = yearly.apply(&subs, today).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2]);

        let active_netflix = ListFilter {
            status: Some(Status::Active),
            service: Some("Netflix".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = active_netflix.apply(&subs, today).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);

        let searched = ListFilter {
            status: Some(Status::Active),
            query: Some("netflix".to_string()),
            ..Default::default()
        };
        let ids: Vec<i64> = searched.apply(&subs, today).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);

        assert_eq!(ListFilter::default().apply(&subs, today).len(), 3);
    }

    #[test]
    fn test_search_subscriptions() {
        let d = date(2024, 1, 1);
        let mut sub = subscription_model(1, "YouTube Premium", 129.0, d, d);
        sub.customer_name = "Ravi Kumar".to_string();
        sub.phone_number = "9876543210".to_string();
        let subs = vec![sub];

        assert_eq!(search_subscriptions(&subs, "youtube").len(), 1);
        assert_eq!(search_subscriptions(&subs, "RAVI").len(), 1);
        assert_eq!(search_subscriptions(&subs, "54321").len(), 1);
        assert!(search_subscriptions(&subs, "netflix").is_empty());
    }

    #[tokio::test]
    async fn test_edit_several_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;

        let edit = SubscriptionEdit {
            customer_name: Some(" Meera Iyer ".to_string()),
            phone_number: Some("91234 56789".to_string()),
            customer_email: Some("meera@example.in".to_string()),
            subscription_name: Some("Prime Video".to_string()),
            amount: Some("₹1,499".to_string()),
            buy_date: Some(date(2024, 1, 10)),
            expiry_date: Some(date(2024, 4, 10)),
        };
        let updated = update_subscription(&db, "owner", sub.id, edit.into_patch()?).await?;

        assert_eq!(updated.customer_name, "Meera Iyer");
        assert_eq!(updated.phone_number, "91234 56789");
        assert_eq!(updated.customer_email.as_deref(), Some("meera@example.in"));
        assert_eq!(updated.subscription_name, "Prime Video");
        assert_eq!(updated.amount, 1499.0);
        assert_eq!(updated.buy_date, date(2024, 1, 10));
        assert_eq!(updated.expiry_date, date(2024, 4, 10));
        assert_eq!(
            infer_validity_label(updated.buy_date, updated.expiry_date),
            ValidityPeriod::ThreeMonths
        );

        let stored = get_subscription(&db, "owner", sub.id).await?.unwrap();
        assert_eq!(stored.subscription_name, "Prime Video");
        assert_eq!(stored.expiry_date, date(2024, 4, 10));
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_clears_email_and_rejects_blank_name() -> Result<()> {
        let db = setup_test_db().await?;
        let sub = create_test_subscription(&db, "owner", "Netflix", date(2024, 1, 1)).await?;
        update_subscription(
            &db,
            "owner",
            sub.id,
            SubscriptionPatch {
                customer_email: Some(Some("old@example.com".to_string())),
                ..Default::default()
            },
        )
        .await?;

        let cleared = SubscriptionEdit {
            customer_email: Some(String::new()),
            ..Default::default()
        };
        let updated = update_subscription(&db, "owner", sub.id, cleared.into_patch()?).await?;
        assert_eq!(updated.customer_email, None);

        let blank = SubscriptionPatch {
            subscription_name: Some("  ".to_string()),
            ..Default::default()
        };
        let result = update_subscription(&db, "owner", sub.id, blank).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_dismiss_in_window() -> Result<()> {
        let db = setup_test_db().await?;
        // Expiries: 2024-03-03, 2024-03-06 and 2024-04-01
        let soon = create_test_subscription(&db, "owner", "Netflix", date(2024, 2, 3)).await?;
        let later = create_test_subscription(&db, "owner", "Spotify", date(2024, 2, 6)).await?;
        let outside = create_test_subscription(&db, "owner", "Zee5", date(2024, 3, 1)).await?;
        let other = create_test_subscription(&db, "someone", "Netflix", date(2024, 2, 3)).await?;
        set_dismissed(&db, "owner", later.id, true).await?;

        let today = date(2024, 3, 1);
        let hidden = dismiss_in_window(&db, "owner", today, date(2024, 3, 8)).await?;
        assert_eq!(hidden, 1);

        let soon = get_subscription(&db, "owner", soon.id).await?.unwrap();
        let later = get_subscription(&db, "owner", later.id).await?.unwrap();
        let outside = get_subscription(&db, "owner", outside.id).await?.unwrap();
        assert!(soon.notification_dismissed);
        assert!(later.notification_dismissed);
        assert!(!outside.notification_dismissed);
        let untouched = get_subscription(&db, "someone", other.id).await?.unwrap();
        assert!(!untouched.notification_dismissed);
        Ok(())
    }

    #[test]
    fn test_custom_validity_is_not_a_list_filter() {
        let result = parse_validity_filter("custom");
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(matches!(
            parse_validity_filter("2_months"),
            Err(Error::InvalidValidity { .. })
        ));
        assert_eq!(parse_validity_filter("6_months").unwrap(), ValidityPeriod::SixMonths);

        // A hand-picked range is listed under the period it is inferred as
        let today = date(2024, 3, 1);
        let subs = vec![subscription_model(
            1,
            "Netflix",
            199.0,
            date(2024, 1, 1),
            date(2024, 3, 1),
        )];
        let monthly = ListFilter {
            validity: Some(parse_validity_filter("1_month").unwrap()),
            ..Default::default()
        };
        assert_eq!(monthly.apply(&subs, today).len(), 1);
    }
}

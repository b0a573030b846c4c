//! Shared test utilities for SubTrack.
//!
//! Helpers for setting up an in-memory database and building subscriptions
//! with sensible defaults.

use crate::{
    core::subscription::{NewSubscription, insert_subscription},
    entities,
    errors::Result,
};
use chrono::{Months, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a one-month subscription starting at `buy_date`.
///
/// # Defaults
/// * `customer_name`: "Test Customer"
/// * `phone_number`: "9876543210"
/// * `amount`: 199.0
#[must_use]
pub fn new_test_subscription(name: &str, buy_date: NaiveDate) -> NewSubscription {
    NewSubscription {
        customer_name: "Test Customer".to_string(),
        customer_email: None,
        phone_number: "9876543210".to_string(),
        subscription_name: name.to_string(),
        amount: 199.0,
        buy_date,
        expiry_date: buy_date
            .checked_add_months(Months::new(1))
            .unwrap_or(buy_date),
    }
}

/// Inserts a one-month test subscription for `user_id`.
pub async fn create_test_subscription(
    db: &DatabaseConnection,
    user_id: &str,
    name: &str,
    buy_date: NaiveDate,
) -> Result<entities::subscription::Model> {
    insert_subscription(db, user_id, new_test_subscription(name, buy_date)).await
}

/// Builds an in-memory model without touching a database.
#[must_use]
pub fn subscription_model(
    id: i64,
    name: &str,
    amount: f64,
    buy_date: NaiveDate,
    expiry_date: NaiveDate,
) -> entities::subscription::Model {
    entities::subscription::Model {
        id,
        user_id: "test_user".to_string(),
        customer_name: "Test Customer".to_string(),
        customer_email: None,
        phone_number: "9876543210".to_string(),
        subscription_name: name.to_string(),
        amount,
        buy_date,
        expiry_date,
        notification_dismissed: false,
        created_at: Utc.timestamp_opt(0, 0).single().unwrap_or_default(),
    }
}

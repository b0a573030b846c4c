//! Subscription entity - The single table SubTrack persists.
//!
//! Each row is one customer's subscription to a service, with the purchase and
//! expiry dates that drive every derived value (status, validity, reminders).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account; every query is scoped by this
    pub user_id: String,
    /// Customer's display name
    pub customer_name: String,
    /// Optional contact email
    pub customer_email: Option<String>,
    /// Contact phone number as entered
    pub phone_number: String,
    /// Service label (e.g. "Netflix") or a custom name
    pub subscription_name: String,
    /// Amount charged for one period
    pub amount: f64,
    /// First day of the current period
    pub buy_date: Date,
    /// Last day of the current period
    pub expiry_date: Date,
    /// Hidden from reminder lists when true
    pub notification_dismissed: bool,
    /// When the record was first stored
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Unified error type for SubTrack.
//!
//! Pure core functions only fail on unrecognized enum input or calendar overflow;
//! form validation problems are returned as data (see [`crate::core::validation`]).

use thiserror::Error;

/// Every failure the application can surface.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Subscription does not exist or belongs to another owner
    #[error("Subscription not found: {id}")]
    SubscriptionNotFound {
        /// Identifier that was looked up
        id: i64,
    },

    /// Unknown renewal mode code
    #[error("Invalid renewal mode: '{mode}' (expected same, 1_month, 3_months, 6_months or 1_year)")]
    InvalidRenewalMode {
        /// The rejected input
        mode: String,
    },

    /// Unknown validity period code
    #[error("Invalid validity period: '{label}'")]
    InvalidValidity {
        /// The rejected input
        label: String,
    },

    /// Unknown reminder window code
    #[error("Invalid reminder window: '{window}' (expected 2days, 7days or 1month)")]
    InvalidWindow {
        /// The rejected input
        window: String,
    },

    /// Calendar arithmetic left chrono's supported range
    #[error("Date out of range: {date} + {months} months")]
    DateOutOfRange {
        /// Anchor date
        date: chrono::NaiveDate,
        /// Offset that overflowed
        months: u32,
    },

    /// A day-based window left chrono's supported range
    #[error("Date out of range: {date} + {days} days")]
    DaysOutOfRange {
        /// Anchor date
        date: chrono::NaiveDate,
        /// Offset that overflowed
        days: u64,
    },

    /// A record failed validation before being persisted
    #[error("Validation failed: {message}")]
    Validation {
        /// Flattened field errors
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Formatting into a response buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

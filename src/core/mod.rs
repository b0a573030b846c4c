//! Core business logic - framework-agnostic subscription operations.
//!
//! The lifecycle, renewal, stats, validation and reminder modules are pure: they
//! never perform I/O or read the clock. `subscription` is the persistence service
//! they are fed from.

/// Status, validity and day-count derivation
pub mod lifecycle;
/// Renewal reminder selection and message formatting
pub mod reminder;
/// Renewal rollforward
pub mod renewal;
/// Dashboard counts and revenue
pub mod stats;
/// Persistence service over the `subscriptions` table
pub mod subscription;
/// Form validation rules
pub mod validation;

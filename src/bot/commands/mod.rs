//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Dashboard, revenue and reminder commands
pub mod dashboard;

/// General utility commands
pub mod general;

/// Subscription management commands
pub mod subscription;

/// Shared formatting and input helpers
pub mod utils;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use subscription::*;

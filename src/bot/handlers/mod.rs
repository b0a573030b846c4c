//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for service names, validity periods and renewal modes
pub mod autocomplete;

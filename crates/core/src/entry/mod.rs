//! Financial entries.
//!
//! This module implements:
//! - Entry domain types and the stored amount and coordinate formats
//! - The entry validation rule set
//! - The status transition guard
//! - Balance aggregation
//! - The entry service and its repository trait

pub mod balance;
pub mod error;
pub mod service;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use balance::net_balance;
pub use error::EntryError;
pub use service::{EntryRepository, EntryService};
pub use status::{StatusGuard, is_future_period};
pub use types::{
    AMOUNT_MAX_INTEGER_DIGITS, AMOUNT_MAX_SCALE, COORDINATE_MAX_INTEGER_DIGITS,
    COORDINATE_MAX_SCALE, Entry, EntryDraft, EntryFilter, EntryStatus, EntryType,
    fits_amount_envelope, fits_coordinate_envelope,
};
pub use validation::{validate_entry, validate_stored_format};

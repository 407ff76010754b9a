//! Business rule validation for entries.
//!
//! The rule set stops at the first violation, checked in this order:
//! description, month, year, owner, amount, type.

use rust_decimal::Decimal;

use super::error::EntryError;
use super::types::{
    DESCRIPTION_MAX_LEN, EntryDraft, fits_amount_envelope, fits_coordinate_envelope,
};

/// Validates an entry before it is created or updated.
///
/// # Errors
///
/// Returns the first rule violated, in the fixed check order.
pub fn validate_entry(draft: &EntryDraft) -> Result<(), EntryError> {
    let description_ok = draft.description.as_deref().is_some_and(|d| {
        let trimmed = d.trim();
        !trimmed.is_empty() && trimmed.chars().count() <= DESCRIPTION_MAX_LEN
    });
    if !description_ok {
        return Err(EntryError::InvalidDescription);
    }

    if !draft.month.is_some_and(is_valid_month) {
        return Err(EntryError::InvalidMonth);
    }

    if !draft.year.is_some_and(is_four_digit_year) {
        return Err(EntryError::InvalidYear);
    }

    if draft.user_id.is_none() {
        return Err(EntryError::MissingUser);
    }

    if !draft.amount.is_some_and(|a| a > Decimal::ZERO) {
        return Err(EntryError::InvalidAmount);
    }

    if draft.entry_type.is_none() {
        return Err(EntryError::MissingType);
    }

    Ok(())
}

/// Validates amount and coordinates against their stored numeric formats.
///
/// Runs after the rule set, so a present amount is already positive.
///
/// # Errors
///
/// Returns `InvalidAmount`, `InvalidLatitude` or `InvalidLongitude` for the
/// first value that does not fit.
pub fn validate_stored_format(draft: &EntryDraft) -> Result<(), EntryError> {
    if draft.amount.is_some_and(|v| !fits_amount_envelope(v)) {
        return Err(EntryError::InvalidAmount);
    }
    if draft.latitude.is_some_and(|v| !fits_coordinate_envelope(v)) {
        return Err(EntryError::InvalidLatitude);
    }
    if draft.longitude.is_some_and(|v| !fits_coordinate_envelope(v)) {
        return Err(EntryError::InvalidLongitude);
    }
    Ok(())
}

/// Returns true for months 1 through 12.
#[must_use]
pub fn is_valid_month(month: i32) -> bool {
    (1..=12).contains(&month)
}

/// Returns true for positive years written with exactly four digits.
#[must_use]
pub fn is_four_digit_year(year: i32) -> bool {
    (1000..=9999).contains(&year)
}

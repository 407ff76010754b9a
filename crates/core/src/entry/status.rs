//! Status transition guard.
//!
//! Pending is the only state that accepts edits or status changes. Settling
//! is refused while the entry's (year, month) lies after the current month.

use chrono::{Datelike, NaiveDate};

use super::error::EntryError;
use super::types::{Entry, EntryStatus};

/// Stateless guard over entry status transitions.
pub struct StatusGuard;

impl StatusGuard {
    /// Checks that an entry in `current` status may have its fields edited.
    ///
    /// # Errors
    ///
    /// Returns `EntryLocked` for settled or cancelled entries.
    pub fn ensure_editable(current: EntryStatus) -> Result<(), EntryError> {
        if current.is_terminal() {
            return Err(EntryError::EntryLocked);
        }
        Ok(())
    }

    /// Parses a requested target status.
    ///
    /// Only `Settled` and `Cancelled` are valid targets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` for blank, unknown or non-target statuses.
    pub fn parse_requested(raw: &str) -> Result<EntryStatus, EntryError> {
        match EntryStatus::parse(raw) {
            Some(status @ (EntryStatus::Settled | EntryStatus::Cancelled)) => Ok(status),
            _ => Err(EntryError::InvalidStatus),
        }
    }

    /// Validates moving `entry` to `requested` as of `today`.
    ///
    /// # Returns
    /// * `Ok(requested)` when the transition is allowed
    /// * `Err(InvalidStatus)` if `requested` is not a target status
    /// * `Err(EntryLocked)` if the entry is already terminal
    /// * `Err(FutureSettlement)` when settling an entry from a later month
    pub fn transition(
        entry: &Entry,
        requested: EntryStatus,
        today: NaiveDate,
    ) -> Result<EntryStatus, EntryError> {
        if requested == EntryStatus::Pending {
            return Err(EntryError::InvalidStatus);
        }

        Self::ensure_editable(entry.status)?;

        if requested == EntryStatus::Settled
            && is_future_period(Some(entry.year), Some(entry.month), today)
        {
            return Err(EntryError::FutureSettlement);
        }

        Ok(requested)
    }
}

/// Returns true if (year, month) lies strictly after the month of `today`.
///
/// A missing year or month is never in the future.
#[must_use]
pub fn is_future_period(year: Option<i32>, month: Option<i32>, today: NaiveDate) -> bool {
    let (Some(year), Some(month)) = (year, month) else {
        return false;
    };
    let current_month = today.month().cast_signed();
    (year, month) > (today.year(), current_month)
}

//! Row processor.
//!
//! Turns one data row into a hard failure, a soft failure with a degraded
//! entry, or a clean entry. Rows are numbered from 1, header excluded.

use chrono::NaiveDate;

use moneta_shared::types::{CategoryId, EntryId, UserId};

use super::fields::{self, Column, EXPECTED_COLUMNS, FieldError, Severity};
use crate::entry::{Entry, EntryStatus};

/// Result of processing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// No entry could be built.
    HardFailure {
        /// Diagnostic for the row.
        message: String,
    },
    /// Entry built with one or more fields nulled.
    SoftFailure {
        /// The degraded entry.
        entry: Entry,
        /// Diagnostic for the row.
        message: String,
    },
    /// Entry built from fully valid fields.
    Clean {
        /// The entry.
        entry: Entry,
    },
}

/// Everything a row needs besides its own cells.
pub struct RowContext<F>
where
    F: Fn(&str) -> Option<CategoryId>,
{
    /// Owner of every imported entry.
    pub owner: UserId,
    /// Registration date stamped on every entry.
    pub registered_on: NaiveDate,
    /// Category lookup by exact description.
    pub find_category: F,
}

impl<F> RowContext<F>
where
    F: Fn(&str) -> Option<CategoryId>,
{
    /// Processes one row of raw cells.
    pub fn process(&self, row_number: usize, cells: &[&str]) -> RowOutcome {
        if cells.len() != EXPECTED_COLUMNS {
            return RowOutcome::HardFailure {
                message: column_count_message(row_number, cells.len()),
            };
        }
        let cell = |column: Column| cells[column.index()];

        let description = fields::description(cell(Column::Description));
        let month = fields::month(cell(Column::Month));
        let year = fields::year(cell(Column::Year));
        let amount = fields::amount(cell(Column::Amount));
        let entry_type = fields::entry_type(cell(Column::Type));

        let (
            Ok(description),
            Ok(month),
            Ok(year),
            Ok(amount),
            Ok(entry_type),
        ) = (&description, &month, &year, &amount, &entry_type)
        else {
            let failures: Vec<&FieldError> = [
                description.as_ref().err(),
                month.as_ref().err(),
                year.as_ref().err(),
                amount.as_ref().err(),
                entry_type.as_ref().err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            return RowOutcome::HardFailure {
                message: row_message(row_number, "error(s)", &failures),
            };
        };

        let mut warnings = Vec::new();
        let latitude = keep_soft(
            fields::coordinate(Column::Latitude, cell(Column::Latitude)),
            &mut warnings,
        );
        let longitude = keep_soft(
            fields::coordinate(Column::Longitude, cell(Column::Longitude)),
            &mut warnings,
        );
        let category_id = keep_soft(
            fields::category(cell(Column::Category), &self.find_category),
            &mut warnings,
        );

        let entry = Entry {
            id: EntryId::new(),
            description: description.clone(),
            month: *month,
            year: *year,
            amount: *amount,
            entry_type: *entry_type,
            status: EntryStatus::Pending,
            latitude,
            longitude,
            category_id,
            user_id: self.owner,
            registered_on: self.registered_on,
        };

        if warnings.is_empty() {
            RowOutcome::Clean { entry }
        } else {
            let warnings: Vec<&FieldError> = warnings.iter().collect();
            RowOutcome::SoftFailure {
                entry,
                message: row_message(row_number, "warning(s)", &warnings),
            }
        }
    }
}

/// Message for a row with the wrong number of cells.
#[must_use]
pub fn column_count_message(row_number: usize, found: usize) -> String {
    format!(
        "- Row {row_number}: wrong number of columns (expected: {EXPECTED_COLUMNS}, found: {found})."
    )
}

/// Message for a record the CSV reader could not decode.
#[must_use]
pub fn unreadable_row_message(row_number: usize, reason: &str) -> String {
    format!("- Row {row_number}: the record could not be read ({reason}).")
}

/// Nulls a soft-failed optional field, keeping its diagnostic.
fn keep_soft<T>(result: Result<Option<T>, FieldError>, warnings: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            debug_assert_eq!(err.severity, Severity::Soft);
            warnings.push(err);
            None
        }
    }
}

fn row_message(row_number: usize, label: &str, failures: &[&FieldError]) -> String {
    let mut message = format!("- Row {row_number} {label}:");
    for failure in failures {
        message.push_str("\n  ");
        message.push_str(&failure.to_string());
    }
    message
}

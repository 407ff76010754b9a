//! Import service: reads an uploaded CSV and persists its valid rows.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use moneta_shared::types::{CategoryId, UserId};

use super::error::ImportError;
use super::row::{RowContext, unreadable_row_message};
use super::types::{ImportResult, ImportTally};
use crate::category::CategoryRepository;
use crate::entry::EntryRepository;
use crate::user::UserRepository;

/// Import service.
pub struct ImportService<E, U, C>
where
    E: EntryRepository,
    U: UserRepository,
    C: CategoryRepository,
{
    entries: Arc<E>,
    users: Arc<U>,
    categories: Arc<C>,
}

impl<E, U, C> ImportService<E, U, C>
where
    E: EntryRepository,
    U: UserRepository,
    C: CategoryRepository,
{
    /// Create a new import service.
    #[must_use]
    pub fn new(entries: Arc<E>, users: Arc<U>, categories: Arc<C>) -> Self {
        Self {
            entries,
            users,
            categories,
        }
    }

    /// Import every row of a CSV upload for one user.
    ///
    /// The first line is a header and is skipped. Rows are numbered by the
    /// line they start on, header excluded, so blank lines the reader skips
    /// still count. Rows with a hard failure are reported and dropped; every
    /// other row becomes a pending entry and all of them are stored in one
    /// batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The upload is empty
    /// - The file name does not end in `.csv`
    /// - The user does not exist
    /// - Storage fails
    pub async fn import_entries(
        &self,
        file_name: &str,
        contents: &[u8],
        user_id: UserId,
    ) -> Result<ImportResult, ImportError> {
        if contents.is_empty() {
            return Err(ImportError::EmptyFile);
        }
        if !has_csv_extension(file_name) {
            return Err(ImportError::InvalidExtension);
        }

        let owner = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| ImportError::repository(e.to_string()))?
            .ok_or(ImportError::UserNotFound)?;

        let categories: HashMap<String, CategoryId> = self
            .categories
            .list()
            .await
            .map_err(|e| ImportError::repository(e.to_string()))?
            .into_iter()
            .map(|c| (c.description, c.id))
            .collect();

        let context = RowContext {
            owner: owner.id,
            registered_on: Utc::now().date_naive(),
            find_category: |name: &str| categories.get(name).copied(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(contents);

        let mut tally = ImportTally::default();
        let mut next_row = 1;
        for record in reader.records() {
            let position = match &record {
                Ok(record) => record.position(),
                Err(err) => err.position(),
            };
            let row_number = position.map_or(next_row, row_of_position);
            next_row = row_number.saturating_add(1);

            match record {
                Ok(record) => {
                    let cells: Vec<&str> = record.iter().collect();
                    tally.record(context.process(row_number, &cells));
                }
                Err(err) => tally.reject(unreadable_row_message(row_number, &err.to_string())),
            }
        }

        let ImportTally {
            entries,
            errors,
            mut messages,
        } = tally;

        let stored = if entries.is_empty() {
            Vec::new()
        } else {
            self.entries
                .insert_many(entries)
                .await
                .map_err(|e| ImportError::repository(e.to_string()))?
        };

        let mut imported_entries_json = Vec::with_capacity(stored.len());
        for entry in &stored {
            match serde_json::to_string(entry) {
                Ok(json) => imported_entries_json.push(json),
                Err(err) => messages.push(format!(
                    "- Entry {} could not be serialized ({err}).",
                    entry.id
                )),
            }
        }

        if errors == 0 && messages.is_empty() {
            messages.push(format!(
                "Import completed successfully: {} entries imported.",
                stored.len()
            ));
        }

        Ok(ImportResult {
            entries_imported: stored.len(),
            errors,
            error_messages: messages,
            imported_entries_json,
        })
    }
}

/// Data row number of a record, given the line it starts on.
fn row_of_position(position: &csv::Position) -> usize {
    usize::try_from(position.line().saturating_sub(1)).unwrap_or(usize::MAX)
}

fn has_csv_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

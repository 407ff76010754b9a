//! Entry service: CRUD, search, status changes and balance.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use moneta_shared::types::{CategoryId, EntryId, UserId};

use super::balance::net_balance;
use super::error::EntryError;
use super::status::StatusGuard;
use super::types::{Entry, EntryDraft, EntryFilter, EntryStatus, EntryType};
use super::validation::{validate_entry, validate_stored_format};
use crate::category::CategoryRepository;
use crate::user::UserRepository;

/// Lowest year accepted by export queries.
pub const QUERY_MIN_YEAR: i32 = 1000;

/// Highest year accepted by export queries.
pub const QUERY_MAX_YEAR: i32 = 3000;

/// Repository trait for entry persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait EntryRepository: Send + Sync {
    /// Store a new entry.
    fn insert(
        &self,
        entry: Entry,
    ) -> impl std::future::Future<Output = Result<Entry, EntryError>> + Send;

    /// Store a batch of entries atomically, preserving order.
    fn insert_many(
        &self,
        entries: Vec<Entry>,
    ) -> impl std::future::Future<Output = Result<Vec<Entry>, EntryError>> + Send;

    /// Overwrite an existing entry.
    fn update(
        &self,
        entry: Entry,
    ) -> impl std::future::Future<Output = Result<Entry, EntryError>> + Send;

    /// Delete entry by ID. Returns false if nothing was deleted.
    fn delete(&self, id: EntryId) -> impl std::future::Future<Output = Result<bool, EntryError>> + Send;

    /// Find entry by ID.
    fn find_by_id(
        &self,
        id: EntryId,
    ) -> impl std::future::Future<Output = Result<Option<Entry>, EntryError>> + Send;

    /// List entries matching a filter.
    fn search(
        &self,
        filter: &EntryFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Entry>, EntryError>> + Send;

    /// Sum of settled amounts of one type for a user; `None` when there are no rows.
    fn settled_sum(
        &self,
        user_id: UserId,
        entry_type: EntryType,
    ) -> impl std::future::Future<Output = Result<Option<Decimal>, EntryError>> + Send;
}

impl EntryDraft {
    /// Validates the draft and builds an entry from it.
    ///
    /// # Errors
    ///
    /// Returns the first rule-set violation, or a stored-format error.
    pub fn into_entry(
        self,
        id: EntryId,
        status: EntryStatus,
        registered_on: NaiveDate,
    ) -> Result<Entry, EntryError> {
        validate_entry(&self)?;
        validate_stored_format(&self)?;

        Ok(Entry {
            id,
            description: self
                .description
                .map(|d| d.trim().to_string())
                .ok_or(EntryError::InvalidDescription)?,
            month: self.month.ok_or(EntryError::InvalidMonth)?,
            year: self.year.ok_or(EntryError::InvalidYear)?,
            amount: self.amount.ok_or(EntryError::InvalidAmount)?,
            entry_type: self.entry_type.ok_or(EntryError::MissingType)?,
            status,
            latitude: self.latitude,
            longitude: self.longitude,
            category_id: self.category_id,
            user_id: self.user_id.ok_or(EntryError::MissingUser)?,
            registered_on,
        })
    }
}

/// Entry service.
pub struct EntryService<E, U, C>
where
    E: EntryRepository,
    U: UserRepository,
    C: CategoryRepository,
{
    entries: Arc<E>,
    users: Arc<U>,
    categories: Arc<C>,
}

impl<E, U, C> EntryService<E, U, C>
where
    E: EntryRepository,
    U: UserRepository,
    C: CategoryRepository,
{
    /// Create a new entry service.
    #[must_use]
    pub fn new(entries: Arc<E>, users: Arc<U>, categories: Arc<C>) -> Self {
        Self {
            entries,
            users,
            categories,
        }
    }

    /// Create a pending entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rule set rejects the draft
    /// - Owner or category does not exist
    /// - The amount or a coordinate does not fit the stored format
    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, EntryError> {
        validate_entry(&draft)?;
        self.ensure_references(draft.user_id, draft.category_id).await?;

        let entry = draft.into_entry(
            EntryId::new(),
            EntryStatus::Pending,
            Utc::now().date_naive(),
        )?;

        self.entries.insert(entry).await
    }

    /// Replace the fields of a pending entry.
    ///
    /// ID, status and registration date are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `EntryLocked`, or any error `create` can return.
    pub async fn update(&self, id: EntryId, draft: EntryDraft) -> Result<Entry, EntryError> {
        let existing = self.get(id).await?;
        StatusGuard::ensure_editable(existing.status)?;

        validate_entry(&draft)?;
        self.ensure_references(draft.user_id, draft.category_id).await?;

        let entry = draft.into_entry(existing.id, existing.status, existing.registered_on)?;
        self.entries.update(entry).await
    }

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has this ID.
    pub async fn delete(&self, id: EntryId) -> Result<(), EntryError> {
        if self.entries.delete(id).await? {
            Ok(())
        } else {
            Err(EntryError::NotFound)
        }
    }

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has this ID.
    pub async fn get(&self, id: EntryId) -> Result<Entry, EntryError> {
        self.entries.find_by_id(id).await?.ok_or(EntryError::NotFound)
    }

    /// Search a user's entries.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the owner does not exist.
    pub async fn search(&self, filter: EntryFilter) -> Result<Vec<Entry>, EntryError> {
        self.ensure_user(filter.user_id).await?;
        self.entries.search(&filter).await
    }

    /// Search for download, with bounds on month and year.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` for a month outside 1-12 or a year outside 1000-3000,
    /// or any error `search` can return.
    pub async fn export(&self, filter: EntryFilter) -> Result<Vec<Entry>, EntryError> {
        if filter.month.is_some_and(|m| !(1..=12).contains(&m)) {
            return Err(EntryError::InvalidQuery("Invalid month.".to_string()));
        }
        if filter
            .year
            .is_some_and(|y| !(QUERY_MIN_YEAR..=QUERY_MAX_YEAR).contains(&y))
        {
            return Err(EntryError::InvalidQuery("Invalid year.".to_string()));
        }
        self.search(filter).await
    }

    /// Move an entry to a new status.
    ///
    /// `today` decides whether the entry's period is in the future.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus`, `NotFound`, `EntryLocked` or `FutureSettlement`.
    pub async fn update_status(
        &self,
        id: EntryId,
        requested: &str,
        today: NaiveDate,
    ) -> Result<Entry, EntryError> {
        let requested = StatusGuard::parse_requested(requested)?;
        let mut entry = self.get(id).await?;

        entry.status = StatusGuard::transition(&entry, requested, today)?;
        self.entries.update(entry).await
    }

    /// Settled income minus settled expense for a user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user does not exist.
    pub async fn balance(&self, user_id: UserId) -> Result<Decimal, EntryError> {
        self.ensure_user(user_id).await?;

        let income = self.entries.settled_sum(user_id, EntryType::Income).await?;
        let expense = self.entries.settled_sum(user_id, EntryType::Expense).await?;

        Ok(net_balance(income, expense))
    }

    async fn ensure_user(&self, user_id: UserId) -> Result<(), EntryError> {
        let found = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| EntryError::repository(e.to_string()))?;

        found.map(|_| ()).ok_or(EntryError::UserNotFound)
    }

    async fn ensure_references(
        &self,
        user_id: Option<UserId>,
        category_id: Option<CategoryId>,
    ) -> Result<(), EntryError> {
        let user_id = user_id.ok_or(EntryError::MissingUser)?;
        self.ensure_user(user_id).await?;

        if let Some(category_id) = category_id {
            let found = self
                .categories
                .find_by_id(category_id)
                .await
                .map_err(|e| EntryError::repository(e.to_string()))?;
            if found.is_none() {
                return Err(EntryError::CategoryNotFound);
            }
        }

        Ok(())
    }
}

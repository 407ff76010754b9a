//! Entry repository for database operations.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

use moneta_core::entry::{Entry, EntryError, EntryFilter, EntryStatus, EntryType};
use moneta_shared::types::{CategoryId, EntryId, UserId};

use crate::entities::entries::{self, EntryKind, EntryState};

/// Entry repository backed by the `entries` table.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<EntryType> for EntryKind {
    fn from(value: EntryType) -> Self {
        match value {
            EntryType::Income => Self::Income,
            EntryType::Expense => Self::Expense,
        }
    }
}

impl From<EntryKind> for EntryType {
    fn from(value: EntryKind) -> Self {
        match value {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
        }
    }
}

impl From<EntryStatus> for EntryState {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Pending => Self::Pending,
            EntryStatus::Settled => Self::Settled,
            EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<EntryState> for EntryStatus {
    fn from(value: EntryState) -> Self {
        match value {
            EntryState::Pending => Self::Pending,
            EntryState::Settled => Self::Settled,
            EntryState::Cancelled => Self::Cancelled,
        }
    }
}

fn to_entry(model: entries::Model) -> Entry {
    Entry {
        id: EntryId(model.id),
        description: model.description,
        month: model.month,
        year: model.year,
        amount: model.amount,
        entry_type: model.entry_type.into(),
        status: model.status.into(),
        latitude: model.latitude,
        longitude: model.longitude,
        category_id: model.category_id.map(CategoryId),
        user_id: UserId(model.user_id),
        registered_on: model.registered_on,
    }
}

fn to_active_model(entry: &Entry) -> entries::ActiveModel {
    entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        description: Set(entry.description.clone()),
        month: Set(entry.month),
        year: Set(entry.year),
        amount: Set(entry.amount),
        entry_type: Set(entry.entry_type.into()),
        status: Set(entry.status.into()),
        latitude: Set(entry.latitude),
        longitude: Set(entry.longitude),
        category_id: Set(entry.category_id.map(CategoryId::into_inner)),
        user_id: Set(entry.user_id.into_inner()),
        registered_on: Set(entry.registered_on),
    }
}

fn repository_error(err: DbErr) -> EntryError {
    EntryError::repository(err.to_string())
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn search_condition(filter: &EntryFilter) -> Condition {
    let mut condition = Condition::all().add(entries::Column::UserId.eq(filter.user_id.into_inner()));

    if let Some(description) = &filter.description {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col(entries::Column::Description)))
                .like(LikeExpr::new(contains_pattern(description)).escape('\\')),
        );
    }
    if let Some(month) = filter.month {
        condition = condition.add(entries::Column::Month.eq(month));
    }
    if let Some(year) = filter.year {
        condition = condition.add(entries::Column::Year.eq(year));
    }
    if let Some(category_id) = filter.category_id {
        condition = condition.add(entries::Column::CategoryId.eq(category_id.into_inner()));
    }
    if let Some(entry_type) = filter.entry_type {
        condition = condition.add(entries::Column::EntryType.eq(EntryKind::from(entry_type)));
    }

    condition
}

impl moneta_core::entry::EntryRepository for EntryRepository {
    async fn insert(&self, entry: Entry) -> Result<Entry, EntryError> {
        let model = to_active_model(&entry)
            .insert(&self.db)
            .await
            .map_err(repository_error)?;

        debug!(entry_id = %model.id, user_id = %model.user_id, "entry created");
        Ok(to_entry(model))
    }

    async fn insert_many(&self, entries: Vec<Entry>) -> Result<Vec<Entry>, EntryError> {
        let txn = self.db.begin().await.map_err(repository_error)?;

        let mut stored = Vec::with_capacity(entries.len());
        for entry in &entries {
            let model = to_active_model(entry)
                .insert(&txn)
                .await
                .map_err(repository_error)?;
            stored.push(to_entry(model));
        }

        txn.commit().await.map_err(repository_error)?;

        info!(count = stored.len(), "entry batch stored");
        Ok(stored)
    }

    async fn update(&self, entry: Entry) -> Result<Entry, EntryError> {
        let model = to_active_model(&entry)
            .update(&self.db)
            .await
            .map_err(|err| match err {
                DbErr::RecordNotUpdated => EntryError::NotFound,
                other => repository_error(other),
            })?;

        debug!(entry_id = %model.id, status = ?model.status, "entry updated");
        Ok(to_entry(model))
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryError> {
        let result = entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(repository_error)?;

        if result.rows_affected > 0 {
            debug!(entry_id = %id, "entry deleted");
        }
        Ok(result.rows_affected > 0)
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError> {
        entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|found| found.map(to_entry))
            .map_err(repository_error)
    }

    async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, EntryError> {
        let models = entries::Entity::find()
            .filter(search_condition(filter))
            .order_by_asc(entries::Column::Year)
            .order_by_asc(entries::Column::Month)
            .order_by_asc(entries::Column::Id)
            .all(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(models.into_iter().map(to_entry).collect())
    }

    async fn settled_sum(
        &self,
        user_id: UserId,
        entry_type: EntryType,
    ) -> Result<Option<Decimal>, EntryError> {
        let sum: Option<Option<Decimal>> = entries::Entity::find()
            .filter(entries::Column::UserId.eq(user_id.into_inner()))
            .filter(entries::Column::EntryType.eq(EntryKind::from(entry_type)))
            .filter(entries::Column::Status.eq(EntryState::Settled))
            .select_only()
            .column_as(entries::Column::Amount.sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(sum.flatten())
    }
}

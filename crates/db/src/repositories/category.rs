//! Category repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::debug;

use moneta_core::category::{Category, CategoryError};
use moneta_shared::types::CategoryId;

use crate::entities::categories;

/// Category repository backed by the `categories` table.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_category(model: categories::Model) -> Category {
    Category {
        id: CategoryId(model.id),
        description: model.description,
    }
}

fn repository_error(err: DbErr) -> CategoryError {
    CategoryError::repository(err.to_string())
}

impl moneta_core::category::CategoryRepository for CategoryRepository {
    async fn create(&self, description: &str) -> Result<Category, CategoryError> {
        let category = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            description: Set(description.to_string()),
        };

        let model = category.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CategoryError::DuplicateDescription
            } else {
                repository_error(err)
            }
        })?;

        debug!(category_id = %model.id, description = %model.description, "category created");
        Ok(to_category(model))
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Description)
            .all(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(models.into_iter().map(to_category).collect())
    }

    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|found| found.map(to_category))
            .map_err(repository_error)
    }

    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, CategoryError> {
        categories::Entity::find()
            .filter(categories::Column::Description.eq(description))
            .one(&self.db)
            .await
            .map(|found| found.map(to_category))
            .map_err(repository_error)
    }
}

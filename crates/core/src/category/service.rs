//! Category service implementation.

use std::sync::Arc;

use moneta_shared::types::CategoryId;

use super::{CATEGORY_DESCRIPTION_MAX_LEN, Category};
use super::error::CategoryError;

/// Repository trait for category persistence.
pub trait CategoryRepository: Send + Sync {
    /// Store a new category with the given description.
    fn create(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Category, CategoryError>> + Send;

    /// List every category, ordered by description.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Category>, CategoryError>> + Send;

    /// Find category by ID.
    fn find_by_id(
        &self,
        id: CategoryId,
    ) -> impl std::future::Future<Output = Result<Option<Category>, CategoryError>> + Send;

    /// Find category by exact description.
    fn find_by_description(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Option<Category>, CategoryError>> + Send;
}

/// Category service.
pub struct CategoryService<R: CategoryRepository> {
    repo: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Create a new category service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is blank, too long or already taken.
    pub async fn create(&self, description: &str) -> Result<Category, CategoryError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CategoryError::EmptyDescription);
        }
        if description.chars().count() > CATEGORY_DESCRIPTION_MAX_LEN {
            return Err(CategoryError::DescriptionTooLong);
        }

        if self.repo.find_by_description(description).await?.is_some() {
            return Err(CategoryError::DuplicateDescription);
        }

        self.repo.create(description).await
    }

    /// List all categories.
    pub async fn list(&self) -> Result<Vec<Category>, CategoryError> {
        self.repo.list().await
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has this ID.
    pub async fn find_by_id(&self, id: CategoryId) -> Result<Category, CategoryError> {
        self.repo.find_by_id(id).await?.ok_or(CategoryError::NotFound)
    }

    /// Look up a category by exact description.
    pub async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, CategoryError> {
        self.repo.find_by_description(description.trim()).await
    }
}

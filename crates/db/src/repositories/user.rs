//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use tracing::debug;

use moneta_core::user::{NewUser, User, UserError};
use moneta_shared::types::UserId;

use crate::entities::users;

/// User repository backed by the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId(model.id),
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
        }
    }
}

fn repository_error(err: DbErr) -> UserError {
    UserError::repository(err.to_string())
}

impl moneta_core::user::UserRepository for UserRepository {
    async fn create(&self, input: NewUser) -> Result<User, UserError> {
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = user.insert(&self.db).await.map_err(|err| {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                UserError::EmailTaken
            } else {
                repository_error(err)
            }
        })?;

        debug!(user_id = %model.id, "user created");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        users::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map(|found| found.map(User::from))
            .map_err(repository_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map(|found| found.map(User::from))
            .map_err(repository_error)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(repository_error)?;

        Ok(count > 0)
    }
}

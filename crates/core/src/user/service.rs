//! User service implementation.

use std::sync::Arc;

use moneta_shared::types::UserId;

use super::error::UserError;
use super::password::{hash_password, verify_password};
use super::types::{NewUser, User};

/// Repository trait for user persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    fn create(
        &self,
        input: NewUser,
    ) -> impl std::future::Future<Output = Result<User, UserError>> + Send;

    /// Find user by ID.
    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, UserError>> + Send;

    /// Find user by email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, UserError>> + Send;

    /// Check if an email is already registered.
    fn email_exists(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<bool, UserError>> + Send;
}

/// User service for registration and login.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Email is blank
    /// - Email is already registered
    /// - Hashing or storage fails
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, UserError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(UserError::InvalidEmail);
        }

        if self.repo.email_exists(email).await? {
            return Err(UserError::EmailTaken);
        }

        let password_hash = hash_password(password)?;

        self.repo
            .create(NewUser {
                name: name.trim().to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
    }

    /// Authenticate a user by email and password.
    ///
    /// # Errors
    ///
    /// Returns `EmailNotFound` or `InvalidPassword` when the credentials do not match.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, UserError> {
        let user = self
            .repo
            .find_by_email(email.trim())
            .await?
            .ok_or(UserError::EmailNotFound)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidPassword);
        }

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user has this ID.
    pub async fn find_by_id(&self, id: UserId) -> Result<User, UserError> {
        self.repo.find_by_id(id).await?.ok_or(UserError::NotFound)
    }
}

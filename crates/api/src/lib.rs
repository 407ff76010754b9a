//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - JWT authentication middleware
//! - Domain error to response mapping

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::header::AUTHORIZATION;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use moneta_core::category::CategoryService;
use moneta_core::entry::EntryService;
use moneta_core::import::ImportService;
use moneta_core::user::UserService;
use moneta_db::{CategoryRepository, EntryRepository, UserRepository};
use moneta_shared::JwtService;
use moneta_shared::config::ImportConfig;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// CSV import settings.
    pub import: ImportConfig,
}

impl AppState {
    fn users(&self) -> Arc<UserRepository> {
        Arc::new(UserRepository::new((*self.db).clone()))
    }

    fn categories(&self) -> Arc<CategoryRepository> {
        Arc::new(CategoryRepository::new((*self.db).clone()))
    }

    fn entries(&self) -> Arc<EntryRepository> {
        Arc::new(EntryRepository::new((*self.db).clone()))
    }

    /// User service over the shared pool.
    #[must_use]
    pub fn user_service(&self) -> UserService<UserRepository> {
        UserService::new(self.users())
    }

    /// Category service over the shared pool.
    #[must_use]
    pub fn category_service(&self) -> CategoryService<CategoryRepository> {
        CategoryService::new(self.categories())
    }

    /// Entry service over the shared pool.
    #[must_use]
    pub fn entry_service(&self) -> EntryService<EntryRepository, UserRepository, CategoryRepository> {
        EntryService::new(self.entries(), self.users(), self.categories())
    }

    /// Import service over the shared pool.
    #[must_use]
    pub fn import_service(
        &self,
    ) -> ImportService<EntryRepository, UserRepository, CategoryRepository> {
        ImportService::new(self.entries(), self.users(), self.categories())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new(std::iter::once(AUTHORIZATION)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

//! Category routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use tracing::info;

use moneta_core::category::Category;

use crate::{ApiError, AppState, middleware::AuthUser};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(create_category))
}

/// Category creation payload.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Unique description.
    pub description: String,
}

/// GET /categories - List every category.
async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.category_service().list().await?))
}

/// POST /categories - Create a category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .category_service()
        .create(&payload.description)
        .await?;

    info!(category_id = %category.id, user_id = %auth.user_id(), "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

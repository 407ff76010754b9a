//! User routes: registration, authentication and balance.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use moneta_core::user::User;
use moneta_shared::AuthToken;
use moneta_shared::types::UserId;

use crate::{ApiError, AppState, middleware::AuthUser};

/// Public user routes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/authenticate", post(authenticate))
}

/// User routes that require authentication.
pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{id}/balance", get(balance))
}

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct AuthenticateRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Balance of a user.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Owner.
    pub user_id: UserId,
    /// Settled income minus settled expense.
    pub balance: Decimal,
}

/// POST /users - Register a new user.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state
        .user_service()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users/authenticate - Exchange credentials for a token.
async fn authenticate(
    State(state): State<AppState>,
    Json(payload): Json<AuthenticateRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    let user = state
        .user_service()
        .authenticate(&payload.email, &payload.password)
        .await
        .inspect_err(|e| info!(email = %payload.email, error = %e, "login failed"))?;

    let token = state
        .jwt_service
        .generate_token(user.id.into_inner(), &user.name)?;

    info!(user_id = %user.id, "user authenticated");
    Ok(Json(AuthToken {
        name: user.name,
        token,
    }))
}

/// GET /users/{id}/balance - Settled income minus settled expense.
async fn balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<BalanceResponse>, ApiError> {
    auth.ensure_owner(user_id)?;

    let balance = state.entry_service().balance(user_id).await?;
    Ok(Json(BalanceResponse { user_id, balance }))
}

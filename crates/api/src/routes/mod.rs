//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod categories;
pub mod entries;
pub mod health;
pub mod import;
pub mod users;

#[cfg(test)]
mod tests;

/// Creates the API router with public routes and the protected routes behind auth.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(users::routes())
        .merge(categories::routes())
        .merge(entries::routes())
        .merge(import::routes(state.import.max_upload_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(users::public_routes())
        .merge(protected_routes)
}

//! Entry routes: search, download, CRUD and status changes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use moneta_core::entry::{Entry, EntryDraft, EntryError, EntryFilter, EntryType};
use moneta_shared::types::{CategoryId, EntryId, UserId};

use crate::{ApiError, AppState, middleware::AuthUser};

/// Creates the entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(search_entries).post(create_entry))
        .route("/entries/download", get(download_entries))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/{id}/status", put(update_status))
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct EntryQuery {
    /// Owner; defaults to the caller.
    pub user: Option<UserId>,
    /// Description substring.
    pub description: Option<String>,
    /// Exact month.
    pub month: Option<i32>,
    /// Exact year.
    pub year: Option<i32>,
    /// Exact category.
    pub category_id: Option<CategoryId>,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

impl EntryQuery {
    fn into_filter(self, auth: &AuthUser) -> Result<EntryFilter, ApiError> {
        let user_id = self.user.unwrap_or_else(|| auth.user_id());
        auth.ensure_owner(user_id)?;

        let entry_type = match self.entry_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(EntryType::parse(raw).ok_or_else(|| {
                EntryError::InvalidQuery(format!("Invalid entry type: {raw}."))
            })?),
        };

        Ok(EntryFilter {
            user_id,
            description: self.description.filter(|d| !d.trim().is_empty()),
            month: self.month,
            year: self.year,
            category_id: self.category_id,
            entry_type,
        })
    }
}

/// Status change payload.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    /// Requested status.
    pub status: String,
}

/// GET /entries - Search the caller's entries.
async fn search_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let filter = query.into_filter(&auth)?;
    Ok(Json(state.entry_service().search(filter).await?))
}

/// GET /entries/download - Search results as a JSON attachment.
async fn download_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<EntryQuery>,
) -> Result<Response, ApiError> {
    let filter = query.into_filter(&auth)?;
    let entries = state.entry_service().export(filter).await?;

    if entries.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    info!(user_id = %auth.user_id(), count = entries.len(), "entries exported");
    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"entries.json\"",
        )],
        Json(entries),
    )
        .into_response())
}

/// POST /entries - Create a pending entry.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(draft): Json<EntryDraft>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    if let Some(owner) = draft.user_id {
        auth.ensure_owner(owner)?;
    }

    let entry = state.entry_service().create(draft).await?;

    info!(entry_id = %entry.id, user_id = %entry.user_id, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /entries/{id} - Fetch one entry.
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<Entry>, ApiError> {
    let entry = state.entry_service().get(id).await?;
    auth.ensure_owner(entry.user_id)?;
    Ok(Json(entry))
}

/// PUT /entries/{id} - Replace the fields of a pending entry.
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EntryId>,
    Json(draft): Json<EntryDraft>,
) -> Result<Json<Entry>, ApiError> {
    let service = state.entry_service();
    auth.ensure_owner(service.get(id).await?.user_id)?;
    if let Some(owner) = draft.user_id {
        auth.ensure_owner(owner)?;
    }

    let entry = service.update(id, draft).await?;

    info!(entry_id = %entry.id, "entry updated");
    Ok(Json(entry))
}

/// DELETE /entries/{id} - Remove an entry.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, ApiError> {
    let service = state.entry_service();
    auth.ensure_owner(service.get(id).await?.user_id)?;

    service.delete(id).await?;

    info!(entry_id = %id, "entry deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /entries/{id}/status - Settle or cancel a pending entry.
async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EntryId>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<Entry>, ApiError> {
    let service = state.entry_service();
    auth.ensure_owner(service.get(id).await?.user_id)?;

    let entry = service
        .update_status(id, &payload.status, Utc::now().date_naive())
        .await?;

    info!(entry_id = %entry.id, status = %entry.status, "entry status changed");
    Ok(Json(entry))
}

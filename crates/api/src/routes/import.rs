//! CSV import route.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    routing::post,
};
use bytes::Bytes;
use tracing::{debug, info};

use moneta_core::import::ImportResult;
use moneta_shared::types::UserId;

use crate::{ApiError, AppState, middleware::AuthUser};

/// Name of the multipart field carrying the CSV.
const FILE_FIELD: &str = "file";

/// Creates the import routes with the configured upload limit.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/users/{id}/entries/import", post(import_entries))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /users/{id}/entries/import - Import entries from a CSV upload.
async fn import_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
    multipart: Multipart,
) -> Result<Json<ImportResult>, ApiError> {
    auth.ensure_owner(user_id)?;

    let limit = state.import.max_upload_bytes;
    let (file_name, contents) = read_upload(multipart, limit).await?;
    debug!(%user_id, file_name = %file_name, bytes = contents.len(), "received import upload");

    let result = state
        .import_service()
        .import_entries(&file_name, &contents, user_id)
        .await?;

    info!(
        %user_id,
        imported = result.entries_imported,
        errors = result.errors,
        "import finished"
    );
    Ok(Json(result))
}

/// Reads the `file` field, returning its file name and contents.
async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let contents = field.bytes().await.map_err(|e| multipart_error(&e, limit))?;
        return Ok((file_name, contents));
    }

    Err(ApiError::new(
        StatusCode::BAD_REQUEST,
        "MISSING_FILE",
        "Send the CSV in a multipart field named 'file'.",
    ))
}

fn multipart_error(err: &MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(limit)
    } else {
        ApiError::new(StatusCode::BAD_REQUEST, "INVALID_MULTIPART", err.body_text())
    }
}

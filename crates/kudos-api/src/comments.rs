use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use kudos_types::api::{CommentPayload, MessageResponse};

use crate::error::{ApiError, CARD_NOT_FOUND, COMMENT_NOT_FOUND};
use crate::extract::{JsonBody, RecordId};
use crate::{AppState, run_db};

/// GET /cards/{id}/comments: newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    RecordId(card_id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let comments = run_db(&state, "Failed to fetch comments", move |db| db.list_comments(card_id))
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    RecordId(card_id): RecordId,
    JsonBody(payload): JsonBody<CommentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = payload.validate().map_err(ApiError::Validation)?;
    let created = run_db(&state, "Failed to create comment", move |db| {
        db.create_comment(card_id, &comment)
    })
    .await?
    .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    info!("Comment {} added to card {}", created.id, card_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_comment(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let comment = run_db(&state, "Failed to fetch comment", move |db| db.get_comment(id))
        .await?
        .ok_or(ApiError::NotFound(COMMENT_NOT_FOUND))?;
    Ok(Json(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let removed = run_db(&state, "Failed to delete comment", move |db| db.delete_comment(id)).await?;
    if !removed {
        return Err(ApiError::NotFound(COMMENT_NOT_FOUND));
    }
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}

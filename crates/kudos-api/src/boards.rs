use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use kudos_types::api::{BoardPayload, MessageResponse};

use crate::error::{ApiError, BOARD_NOT_FOUND};
use crate::extract::{JsonBody, RecordId};
use crate::{AppState, run_db};

/// GET /boards: newest first.
pub async fn list_boards(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let boards = run_db(&state, "Failed to fetch boards", |db| db.list_boards()).await?;
    Ok(Json(boards))
}

/// GET /boards/{id}: the board with its cards.
pub async fn get_board(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let board = run_db(&state, "Failed to fetch board", move |db| db.get_board_with_cards(id))
        .await?
        .ok_or(ApiError::NotFound(BOARD_NOT_FOUND))?;
    Ok(Json(board))
}

pub async fn create_board(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<BoardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate().map_err(ApiError::Validation)?;
    let board = run_db(&state, "Failed to create board", move |db| db.create_board(&draft)).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn update_board(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(payload): JsonBody<BoardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate().map_err(ApiError::Validation)?;
    let board = run_db(&state, "Failed to update board", move |db| db.update_board(id, &draft))
        .await?
        .ok_or(ApiError::NotFound(BOARD_NOT_FOUND))?;

    info!("Board {} updated", id);
    Ok(Json(board))
}

/// DELETE /boards/{id}: removes the board's cards and comments too.
pub async fn delete_board(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let removed = run_db(&state, "Failed to delete board", move |db| db.delete_board(id)).await?;
    if !removed {
        return Err(ApiError::NotFound(BOARD_NOT_FOUND));
    }
    Ok(Json(MessageResponse::new("Board deleted successfully")))
}

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, info};

use kudos_types::api::{CardPayload, MessageResponse};

use crate::error::{ApiError, BOARD_NOT_FOUND, CARD_NOT_FOUND};
use crate::extract::{BoardId, JsonBody, RecordId};
use crate::{AppState, run_db};

/// GET /cards: grouped by board, lowest board id first.
pub async fn list_cards(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cards = run_db(&state, "Failed to fetch cards", |db| db.list_cards()).await?;
    Ok(Json(cards))
}

pub async fn get_card(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let card = run_db(&state, "Failed to fetch card", move |db| db.get_card(id))
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;
    Ok(Json(card))
}

/// POST /boards/{id}/cards
pub async fn create_card(
    State(state): State<AppState>,
    BoardId(board_id): BoardId,
    JsonBody(payload): JsonBody<CardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate().map_err(ApiError::Validation)?;
    let card = run_db(&state, "Failed to create card", move |db| db.create_card(board_id, &draft))
        .await?
        .ok_or(ApiError::NotFound(BOARD_NOT_FOUND))?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_card(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    JsonBody(payload): JsonBody<CardPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate().map_err(ApiError::Validation)?;
    let card = run_db(&state, "Failed to update card", move |db| db.update_card(id, &draft))
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    info!("Card {} updated", id);
    Ok(Json(card))
}

/// PUT /cards/{id}/vote: always exactly +1; any request body is ignored.
pub async fn vote_card(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let card = run_db(&state, "Failed to update vote", move |db| db.vote_card(id))
        .await?
        .ok_or(ApiError::NotFound(CARD_NOT_FOUND))?;

    debug!("Card {} now has {} votes", card.id, card.votes);
    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, ApiError> {
    let removed = run_db(&state, "Failed to delete card", move |db| db.delete_card(id)).await?;
    if !removed {
        return Err(ApiError::NotFound(CARD_NOT_FOUND));
    }
    Ok(Json(MessageResponse::new("Card deleted successfully")))
}

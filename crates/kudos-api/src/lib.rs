pub mod boards;
pub mod cards;
pub mod comments;
pub mod error;
pub mod extract;

use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post, put},
};

use kudos_db::Database;
use kudos_types::api::MessageResponse;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

impl AppStateInner {
    pub fn new(db: Database) -> AppState {
        Arc::new(Self { db })
    }
}

/// Every resource route. Cross-cutting layers (CORS, tracing) are added by
/// the binary.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{id}",
            get(boards::get_board)
                .put(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{id}/cards", post(cards::create_card))
        .route("/cards", get(cards::list_cards))
        .route(
            "/cards/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/cards/{id}/vote", put(cards::vote_card))
        .route(
            "/cards/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            get(comments::get_comment).delete(comments::delete_comment),
        )
        .with_state(state)
}

async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the Kudos Board API"))
}

/// Run a blocking store call off the async runtime. `context` is the generic
/// message a client sees if the call fails.
pub(crate) async fn run_db<F, T>(state: &AppState, context: &'static str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| ApiError::internal(context, anyhow::anyhow!("spawn_blocking join error: {}", e)))?
        .map_err(|e| ApiError::internal(context, e))
}

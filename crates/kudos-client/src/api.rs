use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::error;

use kudos_types::api::{BoardDraft, CardDraft, MessageResponse, NewComment};
use kudos_types::models::{Board, BoardWithCards, Card, Comment};

use crate::error::ClientError;

/// One method per API operation. No caching, retries or request dedup:
/// every call is exactly one HTTP request.
#[derive(Debug, Clone)]
pub struct KudosClient {
    http: Client,
    base_url: String,
}

impl KudosClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T, ClientError> {
        let response = request.send().await.map_err(|e| {
            error!("Error {}: {}", action, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Error {}: HTTP {}", action, status);
            return Err(ClientError::Status(status));
        }

        response.json::<T>().await.map_err(|e| {
            error!("Error {}: {}", action, e);
            ClientError::Decode(e)
        })
    }

    // -- Boards --

    pub async fn get_boards(&self) -> Result<Vec<Board>, ClientError> {
        self.send(self.http.get(self.url("/boards")), "fetching boards").await
    }

    pub async fn get_board(&self, id: i64) -> Result<BoardWithCards, ClientError> {
        self.send(
            self.http.get(self.url(&format!("/boards/{id}"))),
            &format!("fetching board {id}"),
        )
        .await
    }

    pub async fn create_board(&self, draft: &BoardDraft) -> Result<Board, ClientError> {
        self.send(self.http.post(self.url("/boards")).json(draft), "creating board").await
    }

    pub async fn update_board(&self, id: i64, draft: &BoardDraft) -> Result<Board, ClientError> {
        self.send(
            self.http.put(self.url(&format!("/boards/{id}"))).json(draft),
            &format!("updating board {id}"),
        )
        .await
    }

    pub async fn delete_board(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.send(
            self.http.delete(self.url(&format!("/boards/{id}"))),
            &format!("deleting board {id}"),
        )
        .await
    }

    // -- Cards --

    pub async fn get_cards(&self) -> Result<Vec<Card>, ClientError> {
        self.send(self.http.get(self.url("/cards")), "fetching cards").await
    }

    pub async fn get_card(&self, id: i64) -> Result<Card, ClientError> {
        self.send(
            self.http.get(self.url(&format!("/cards/{id}"))),
            &format!("fetching card {id}"),
        )
        .await
    }

    pub async fn create_card(&self, board_id: i64, draft: &CardDraft) -> Result<Card, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!("/boards/{board_id}/cards")))
                .json(draft),
            &format!("creating card for board {board_id}"),
        )
        .await
    }

    pub async fn update_card(&self, id: i64, draft: &CardDraft) -> Result<Card, ClientError> {
        self.send(
            self.http.put(self.url(&format!("/cards/{id}"))).json(draft),
            &format!("updating card {id}"),
        )
        .await
    }

    pub async fn vote_card(&self, id: i64) -> Result<Card, ClientError> {
        self.send(
            self.http.put(self.url(&format!("/cards/{id}/vote"))),
            &format!("voting for card {id}"),
        )
        .await
    }

    pub async fn delete_card(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.send(
            self.http.delete(self.url(&format!("/cards/{id}"))),
            &format!("deleting card {id}"),
        )
        .await
    }

    // -- Comments --

    pub async fn get_comments(&self, card_id: i64) -> Result<Vec<Comment>, ClientError> {
        self.send(
            self.http.get(self.url(&format!("/cards/{card_id}/comments"))),
            &format!("fetching comments for card {card_id}"),
        )
        .await
    }

    pub async fn add_comment(&self, card_id: i64, comment: &NewComment) -> Result<Comment, ClientError> {
        self.send(
            self.http
                .post(self.url(&format!("/cards/{card_id}/comments")))
                .json(comment),
            &format!("adding comment to card {card_id}"),
        )
        .await
    }

    pub async fn get_comment(&self, id: i64) -> Result<Comment, ClientError> {
        self.send(
            self.http.get(self.url(&format!("/comments/{id}"))),
            &format!("fetching comment {id}"),
        )
        .await
    }

    pub async fn delete_comment(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.send(
            self.http.delete(self.url(&format!("/comments/{id}"))),
            &format!("deleting comment {id}"),
        )
        .await
    }
}

//! Client-side state. `BoardStore` is the single owner of the dashboard's
//! board list and `BoardDetail` owns one open board with its cards. Every
//! action talks to the server first and only touches local state once the
//! request has succeeded.

use chrono::{DateTime, Utc};

use kudos_types::api::{BoardDraft, CardDraft};
use kudos_types::models::{Board, BoardWithCards, Card};

use crate::api::KudosClient;
use crate::error::ClientError;
use crate::filter::{ActiveFilter, filter_boards};

#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    boards: Vec<Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boards(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub async fn load(&mut self, client: &KudosClient) -> Result<(), ClientError> {
        self.boards = client.get_boards().await?;
        Ok(())
    }

    /// New boards go to the front, matching the server's newest-first order.
    pub async fn create(&mut self, client: &KudosClient, draft: &BoardDraft) -> Result<&Board, ClientError> {
        let board = client.create_board(draft).await?;
        self.boards.insert(0, board);
        Ok(&self.boards[0])
    }

    pub async fn update(&mut self, client: &KudosClient, id: i64, draft: &BoardDraft) -> Result<(), ClientError> {
        let board = client.update_board(id, draft).await?;
        match self.boards.iter_mut().find(|b| b.id == id) {
            Some(slot) => *slot = board,
            None => self.boards.insert(0, board),
        }
        Ok(())
    }

    pub async fn delete(&mut self, client: &KudosClient, id: i64) -> Result<(), ClientError> {
        client.delete_board(id).await?;
        self.boards.retain(|b| b.id != id);
        Ok(())
    }

    pub fn visible(&self, filter: ActiveFilter, query: &str, now: DateTime<Utc>) -> Vec<&Board> {
        filter_boards(&self.boards, filter, query, now)
    }
}

#[derive(Debug, Clone)]
pub struct BoardDetail {
    board: BoardWithCards,
}

impl BoardDetail {
    pub async fn load(client: &KudosClient, id: i64) -> Result<Self, ClientError> {
        let board = client.get_board(id).await?;
        Ok(Self { board })
    }

    pub fn board(&self) -> &Board {
        &self.board.board
    }

    pub fn cards(&self) -> &[Card] {
        &self.board.cards
    }

    pub async fn add_card(&mut self, client: &KudosClient, draft: &CardDraft) -> Result<&Card, ClientError> {
        let card = client.create_card(self.board.board.id, draft).await?;
        self.board.cards.push(card);
        let idx = self.board.cards.len() - 1;
        Ok(&self.board.cards[idx])
    }

    /// Returns the server's vote count for the card.
    pub async fn upvote(&mut self, client: &KudosClient, card_id: i64) -> Result<i64, ClientError> {
        let updated = client.vote_card(card_id).await?;
        if let Some(card) = self.board.cards.iter_mut().find(|c| c.id == card_id) {
            card.votes = updated.votes;
        }
        Ok(updated.votes)
    }

    pub async fn remove_card(&mut self, client: &KudosClient, card_id: i64) -> Result<(), ClientError> {
        client.delete_card(card_id).await?;
        self.board.cards.retain(|c| c.id != card_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use kudos_types::models::Category;

    #[test]
    fn visible_applies_filter_and_search() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let board = |id: i64, title: &str, category: Category| Board {
            id,
            title: title.into(),
            description: "desc".into(),
            category,
            image: "https://example.com/i.png".into(),
            author: "Ana".into(),
            created_at: Some(now - TimeDelta::days(1)),
        };
        let store = BoardStore::from_boards(vec![
            board(1, "Cake Day", Category::Celebration),
            board(2, "Cake thanks", Category::ThankYou),
            board(3, "Party", Category::Celebration),
        ]);

        let ids: Vec<i64> = store
            .visible(ActiveFilter::Category(Category::Celebration), "cake", now)
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![1]);
        assert_eq!(store.visible(ActiveFilter::All, "", now).len(), 3);
    }
}

//! Database row types. These map directly to SQLite rows and are converted
//! into the kudos-types models at the edge of this crate.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Row;

use kudos_types::models::{Board, Card, Category, Comment};

pub(crate) const BOARD_COLUMNS: &str =
    "id, title, description, category, image, author, created_at";
pub(crate) const CARD_COLUMNS: &str =
    "id, title, description, gif, author, votes, board_id, created_at";
pub(crate) const COMMENT_COLUMNS: &str = "id, message, author, card_id, created_at";

pub struct BoardRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub author: String,
    pub created_at: String,
}

pub struct CardRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub gif: String,
    pub author: String,
    pub votes: i64,
    pub board_id: i64,
    pub created_at: String,
}

pub struct CommentRow {
    pub id: i64,
    pub message: String,
    pub author: Option<String>,
    pub card_id: i64,
    pub created_at: String,
}

impl BoardRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            category: row.get(3)?,
            image: row.get(4)?,
            author: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}

impl CardRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            gif: row.get(3)?,
            author: row.get(4)?,
            votes: row.get(5)?,
            board_id: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

impl CommentRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            message: row.get(1)?,
            author: row.get(2)?,
            card_id: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

impl TryFrom<BoardRow> for Board {
    type Error = anyhow::Error;

    fn try_from(row: BoardRow) -> Result<Self> {
        let category: Category = row
            .category
            .parse()
            .with_context(|| format!("board {} has a corrupt category", row.id))?;
        Ok(Board {
            id: row.id,
            title: row.title,
            description: row.description,
            category,
            image: row.image,
            author: row.author,
            created_at: Some(parse_timestamp(&row.created_at)?),
        })
    }
}

impl TryFrom<CardRow> for Card {
    type Error = anyhow::Error;

    fn try_from(row: CardRow) -> Result<Self> {
        Ok(Card {
            id: row.id,
            title: row.title,
            description: row.description,
            gif: row.gif,
            author: row.author,
            votes: row.votes,
            board_id: row.board_id,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl TryFrom<CommentRow> for Comment {
    type Error = anyhow::Error;

    fn try_from(row: CommentRow) -> Result<Self> {
        Ok(Comment {
            id: row.id,
            message: row.message,
            author: row.author,
            card_id: row.card_id,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Accepts the RFC 3339 form written by the schema defaults, and the bare
/// `YYYY-MM-DD HH:MM:SS` form produced by SQLite's `datetime('now')`.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .map_err(|e| anyhow!("Corrupt timestamp '{}': {}", raw, e))
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of board categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Celebration,
    ThankYou,
    Inspiration,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Celebration, Self::ThankYou, Self::Inspiration];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celebration => "celebration",
            Self::ThankYou => "thank_you",
            Self::Inspiration => "inspiration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub author: String,
    /// Always set by the server. Lists from elsewhere may omit it, and such
    /// boards still decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /boards/{id}` shape: the board fields plus its cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardWithCards {
    #[serde(flatten)]
    pub board: Board,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub gif: String,
    pub author: String,
    pub votes: i64,
    pub board_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub author: Option<String>,
    pub card_id: i64,
    pub created_at: DateTime<Utc>,
}

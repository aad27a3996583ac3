//! Dashboard filtering: a category (or recency) stage followed by a
//! free-text search stage. Both stages are plain predicates, so the order
//! they run in does not change the result.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};

use kudos_types::models::{Board, Category};

/// How far back the `recent` filter looks.
pub const RECENT_WINDOW: TimeDelta = TimeDelta::days(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Recent,
    Category(Category),
}

impl FromStr for ActiveFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "recent" => Ok(Self::Recent),
            other => other
                .parse::<Category>()
                .map(Self::Category)
                .map_err(|_| format!("unknown filter: {other}")),
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Recent => f.write_str("recent"),
            Self::Category(c) => f.write_str(c.as_str()),
        }
    }
}

impl ActiveFilter {
    pub fn matches(&self, board: &Board, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Recent => board.created_at.is_some_and(|t| t >= now - RECENT_WINDOW),
            Self::Category(category) => board.category == *category,
        }
    }
}

/// Case-insensitive substring match on title, description or author. A
/// blank query matches everything.
pub fn matches_search(board: &Board, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    [&board.title, &board.description, &board.author]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter_boards<'a>(
    boards: &'a [Board],
    filter: ActiveFilter,
    query: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Board> {
    boards
        .iter()
        .filter(|board| filter.matches(board, now))
        .filter(|board| matches_search(board, query))
        .collect()
}

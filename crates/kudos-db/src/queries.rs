use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use kudos_types::api::{BoardDraft, CardDraft, NewComment};
use kudos_types::models::{Board, BoardWithCards, Card, Comment};

use crate::Database;
use crate::models::{BOARD_COLUMNS, BoardRow, CARD_COLUMNS, COMMENT_COLUMNS, CardRow, CommentRow};

impl Database {
    // -- Boards --

    /// Newest first; boards created in the same millisecond fall back to id order.
    pub fn list_boards(&self) -> Result<Vec<Board>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {BOARD_COLUMNS} FROM boards ORDER BY created_at DESC, id DESC");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([], BoardRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter().map(Board::try_from).collect()
        })
    }

    pub fn get_board(&self, id: i64) -> Result<Option<Board>> {
        self.with_conn(|conn| query_board(conn, id))
    }

    pub fn get_board_with_cards(&self, id: i64) -> Result<Option<BoardWithCards>> {
        self.with_conn(|conn| {
            let Some(board) = query_board(conn, id)? else {
                return Ok(None);
            };
            let cards = query_cards(
                conn,
                &format!("SELECT {CARD_COLUMNS} FROM cards WHERE board_id = ?1 ORDER BY id ASC"),
                [id],
            )?;
            Ok(Some(BoardWithCards { board, cards }))
        })
    }

    pub fn create_board(&self, draft: &BoardDraft) -> Result<Board> {
        let board = self.with_conn_mut(|conn| {
            let sql = format!(
                "INSERT INTO boards (title, description, category, image, author)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {BOARD_COLUMNS}"
            );
            let row = conn.query_row(
                &sql,
                params![
                    draft.title,
                    draft.description,
                    draft.category.as_str(),
                    draft.image,
                    draft.author
                ],
                BoardRow::from_row,
            )?;
            Board::try_from(row)
        })?;

        info!("Board {} created by {}", board.id, board.author);
        Ok(board)
    }

    /// Replaces all mutable fields. `None` when the board does not exist.
    pub fn update_board(&self, id: i64, draft: &BoardDraft) -> Result<Option<Board>> {
        self.with_conn_mut(|conn| {
            let sql = format!(
                "UPDATE boards
                 SET title = ?1, description = ?2, category = ?3, image = ?4, author = ?5
                 WHERE id = ?6
                 RETURNING {BOARD_COLUMNS}"
            );
            conn.query_row(
                &sql,
                params![
                    draft.title,
                    draft.description,
                    draft.category.as_str(),
                    draft.image,
                    draft.author,
                    id
                ],
                BoardRow::from_row,
            )
            .optional()?
            .map(Board::try_from)
            .transpose()
        })
    }

    /// Removes the board, its cards and their comments in one transaction.
    /// Returns false when the board does not exist.
    pub fn delete_board(&self, id: i64) -> Result<bool> {
        let removed = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let exists = tx
                .query_row("SELECT 1 FROM boards WHERE id = ?1", [id], |_| Ok(()))
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            let comments = tx.execute(
                "DELETE FROM comments WHERE card_id IN (SELECT id FROM cards WHERE board_id = ?1)",
                [id],
            )?;
            let cards = tx.execute("DELETE FROM cards WHERE board_id = ?1", [id])?;
            tx.execute("DELETE FROM boards WHERE id = ?1", [id])?;
            tx.commit()?;

            Ok(Some((cards, comments)))
        })?;

        match removed {
            Some((cards, comments)) => {
                info!("Board {} deleted with {} cards and {} comments", id, cards, comments);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -- Cards --

    pub fn list_cards(&self) -> Result<Vec<Card>> {
        self.with_conn(|conn| {
            query_cards(
                conn,
                &format!("SELECT {CARD_COLUMNS} FROM cards ORDER BY board_id ASC, id ASC"),
                [],
            )
        })
    }

    pub fn get_card(&self, id: i64) -> Result<Option<Card>> {
        self.with_conn(|conn| query_card(conn, id))
    }

    /// Inserts a card with zero votes. `None` when the board does not exist;
    /// the check and the insert share one transaction.
    pub fn create_card(&self, board_id: i64, draft: &CardDraft) -> Result<Option<Card>> {
        let card = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if query_board(&tx, board_id)?.is_none() {
                return Ok(None);
            }

            let sql = format!(
                "INSERT INTO cards (title, description, gif, author, board_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {CARD_COLUMNS}"
            );
            let row = tx.query_row(
                &sql,
                params![draft.title, draft.description, draft.gif, draft.author, board_id],
                CardRow::from_row,
            )?;
            tx.commit()?;
            Card::try_from(row).map(Some)
        })?;

        if let Some(card) = &card {
            info!("Card {} added to board {}", card.id, board_id);
        }
        Ok(card)
    }

    /// Replaces title, description, gif and author. Votes and board are untouched.
    pub fn update_card(&self, id: i64, draft: &CardDraft) -> Result<Option<Card>> {
        self.with_conn_mut(|conn| {
            let sql = format!(
                "UPDATE cards
                 SET title = ?1, description = ?2, gif = ?3, author = ?4
                 WHERE id = ?5
                 RETURNING {CARD_COLUMNS}"
            );
            conn.query_row(
                &sql,
                params![draft.title, draft.description, draft.gif, draft.author, id],
                CardRow::from_row,
            )
            .optional()?
            .map(Card::try_from)
            .transpose()
        })
    }

    /// Adds exactly one vote in a single statement. A card deleted before the
    /// statement runs yields `None`, never a resurrected row.
    pub fn vote_card(&self, id: i64) -> Result<Option<Card>> {
        self.with_conn_mut(|conn| {
            let sql = format!(
                "UPDATE cards SET votes = votes + 1 WHERE id = ?1 RETURNING {CARD_COLUMNS}"
            );
            conn.query_row(&sql, [id], CardRow::from_row)
                .optional()?
                .map(Card::try_from)
                .transpose()
        })
    }

    /// Removes the card and its comments in one transaction.
    pub fn delete_card(&self, id: i64) -> Result<bool> {
        let removed = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if query_card(&tx, id)?.is_none() {
                return Ok(None);
            }

            let comments = tx.execute("DELETE FROM comments WHERE card_id = ?1", [id])?;
            tx.execute("DELETE FROM cards WHERE id = ?1", [id])?;
            tx.commit()?;
            Ok(Some(comments))
        })?;

        match removed {
            Some(comments) => {
                info!("Card {} deleted with {} comments", id, comments);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -- Comments --

    /// Comments on a card, newest first. `None` when the card does not exist.
    pub fn list_comments(&self, card_id: i64) -> Result<Option<Vec<Comment>>> {
        self.with_conn(|conn| {
            if query_card(conn, card_id)?.is_none() {
                return Ok(None);
            }

            let sql = format!(
                "SELECT {COMMENT_COLUMNS} FROM comments
                 WHERE card_id = ?1
                 ORDER BY created_at DESC, id DESC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([card_id], CommentRow::from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows.into_iter()
                .map(Comment::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Some)
        })
    }

    pub fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        self.with_conn(|conn| {
            let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?1");
            conn.query_row(&sql, [id], CommentRow::from_row)
                .optional()?
                .map(Comment::try_from)
                .transpose()
        })
    }

    /// `None` when the card does not exist.
    pub fn create_comment(&self, card_id: i64, comment: &NewComment) -> Result<Option<Comment>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if query_card(&tx, card_id)?.is_none() {
                return Ok(None);
            }

            let sql = format!(
                "INSERT INTO comments (message, author, card_id)
                 VALUES (?1, ?2, ?3)
                 RETURNING {COMMENT_COLUMNS}"
            );
            let row = tx.query_row(
                &sql,
                params![comment.message, comment.author, card_id],
                CommentRow::from_row,
            )?;
            tx.commit()?;
            Comment::try_from(row).map(Some)
        })
    }

    pub fn delete_comment(&self, id: i64) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let affected = conn.execute("DELETE FROM comments WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

fn query_board(conn: &Connection, id: i64) -> Result<Option<Board>> {
    let sql = format!("SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?1");
    conn.query_row(&sql, [id], BoardRow::from_row)
        .optional()?
        .map(Board::try_from)
        .transpose()
}

fn query_card(conn: &Connection, id: i64) -> Result<Option<Card>> {
    let sql = format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = ?1");
    conn.query_row(&sql, [id], CardRow::from_row)
        .optional()?
        .map(Card::try_from)
        .transpose()
}

fn query_cards<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, CardRow::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(Card::try_from).collect()
}

use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (boards, cards, comments)");
        // No ON DELETE CASCADE: removal of children is done explicitly inside
        // a transaction by the delete queries.
        conn.execute_batch(
            "
            CREATE TABLE boards (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL,
                category    TEXT NOT NULL
                            CHECK (category IN ('celebration', 'thank_you', 'inspiration')),
                image       TEXT NOT NULL,
                author      TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_boards_created ON boards(created_at);

            CREATE TABLE cards (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                description TEXT NOT NULL,
                gif         TEXT NOT NULL,
                author      TEXT NOT NULL DEFAULT 'Anonymous',
                votes       INTEGER NOT NULL DEFAULT 0 CHECK (votes >= 0),
                board_id    INTEGER NOT NULL REFERENCES boards(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_cards_board ON cards(board_id);

            CREATE TABLE comments (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                message     TEXT NOT NULL,
                author      TEXT,
                card_id     INTEGER NOT NULL REFERENCES cards(id),
                created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX idx_comments_card ON comments(card_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}

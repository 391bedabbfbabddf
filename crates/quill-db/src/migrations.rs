use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS accounts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            author_id   INTEGER NOT NULL REFERENCES accounts(id),
            body        TEXT NOT NULL,
            posted_at   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_author
            ON messages(author_id);
        ",
    )?;

    info!("Database schema ready");
    Ok(())
}

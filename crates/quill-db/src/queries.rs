use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension};

use quill_core::ports::{AccountStore, MessageStore};
use quill_types::models::{Account, Message};

use crate::Database;

impl AccountStore for Database {
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            if affected == 0 {
                bail!("account insert affected no rows");
            }
            Ok(conn.last_insert_rowid())
        })
    }

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.with_conn(|conn| query_account(conn, "username = ?1", username))
    }

    fn find_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        self.with_conn(|conn| query_account(conn, "id = ?1", id))
    }
}

impl MessageStore for Database {
    fn insert_message(&self, author_id: i64, text: &str, posted_at: i64) -> Result<i64> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "INSERT INTO messages (author_id, body, posted_at) VALUES (?1, ?2, ?3)",
                (author_id, text, posted_at),
            )?;
            if affected == 0 {
                bail!("message insert affected no rows");
            }
            Ok(conn.last_insert_rowid())
        })
    }

    fn find_all_messages(&self) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, author_id, body, posted_at FROM messages ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], row_to_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn find_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, author_id, body, posted_at FROM messages WHERE id = ?1",
                    [id],
                    row_to_message,
                )
                .optional()?;
            Ok(row)
        })
    }

    fn delete_message_by_id(&self, id: i64) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM messages WHERE id = ?1", [id])?))
    }

    fn update_message_text(&self, id: i64, text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            Ok(conn.execute(
                "UPDATE messages SET body = ?1 WHERE id = ?2",
                (text, id),
            )?)
        })
    }

    fn find_messages_by_author(&self, author_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, author_id, body, posted_at FROM messages
                 WHERE author_id = ?1 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([author_id], row_to_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn query_account<P: rusqlite::ToSql>(
    conn: &Connection,
    predicate: &str,
    param: P,
) -> Result<Option<Account>> {
    let sql = format!("SELECT id, username, password FROM accounts WHERE {predicate}");
    let row = conn
        .query_row(&sql, [&param], |row| {
            Ok(Account {
                id: Some(row.get(0)?),
                username: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: Some(row.get(0)?),
        author_id: row.get(1)?,
        text: row.get(2)?,
        posted_at: row.get(3)?,
    })
}

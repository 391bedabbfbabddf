//! Storage ports consumed by the domain services.
//!
//! The services stay storage-agnostic behind these traits; `quill-db`
//! provides the SQLite implementation, tests provide in-memory ones.
//! All methods are synchronous and may block on I/O — callers on an async
//! runtime are expected to run them on a blocking worker.

use anyhow::Result;
use quill_types::models::{Account, Message};

use crate::error::ServiceError;

/// Raw account persistence primitives. No business logic: validation and
/// uniqueness checks happen in the service before these are called.
pub trait AccountStore: Send + Sync {
    /// Inserts a new account and returns the generated id.
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<i64>;

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    fn find_account_by_id(&self, id: i64) -> Result<Option<Account>>;
}

/// Raw message persistence primitives.
pub trait MessageStore: Send + Sync {
    /// Inserts a new message and returns the generated id.
    fn insert_message(&self, author_id: i64, text: &str, posted_at: i64) -> Result<i64>;

    fn find_all_messages(&self) -> Result<Vec<Message>>;

    fn find_message_by_id(&self, id: i64) -> Result<Option<Message>>;

    /// Returns the number of rows removed (0 or 1).
    fn delete_message_by_id(&self, id: i64) -> Result<usize>;

    /// Returns the number of rows changed (0 or 1).
    fn update_message_text(&self, id: i64, text: &str) -> Result<usize>;

    fn find_messages_by_author(&self, author_id: i64) -> Result<Vec<Message>>;
}

/// The seam between the message side and the account side: the message
/// service only ever needs to resolve an author id to an account. Keeping
/// this an interface lets the two services be tested independently.
pub trait AccountDirectory: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<Account>, ServiceError>;
}

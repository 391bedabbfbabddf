use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use quill_types::models::{Message, NewMessage};

use crate::error::ServiceError;
use crate::ports::{AccountDirectory, MessageStore};

const MAX_TEXT_CHARS: usize = 255;

/// Owns the message lifecycle rules. Depends on the account side only
/// through [`AccountDirectory`], so it can be tested without a real
/// account service behind it.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
    accounts: Arc<dyn AccountDirectory>,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>, accounts: Arc<dyn AccountDirectory>) -> Self {
        Self { store, accounts }
    }

    /// Creates a message: text must be non-blank and at most 255 characters,
    /// and the author must exist. The existence check and the insert are two
    /// separate storage round trips; nothing in scope deletes accounts, so
    /// the window between them is a documented gap rather than a live race.
    pub fn create(&self, candidate: NewMessage) -> Result<Message, ServiceError> {
        validate_text(&candidate.text)?;

        if self.accounts.find_by_id(candidate.author_id)?.is_none() {
            return Err(ServiceError::NotFound("author account does not exist"));
        }

        let posted_at = candidate
            .posted_at
            .unwrap_or_else(|| Utc::now().timestamp());
        let id = self
            .store
            .insert_message(candidate.author_id, &candidate.text, posted_at)?;
        debug!(id, author_id = candidate.author_id, "message created");

        Ok(Message {
            id: Some(id),
            author_id: candidate.author_id,
            text: candidate.text,
            posted_at,
        })
    }

    pub fn retrieve_all(&self) -> Result<Vec<Message>, ServiceError> {
        Ok(self.store.find_all_messages()?)
    }

    /// Pure lookup. Absence is a valid result, not a failure.
    pub fn retrieve_by_id(&self, id: i64) -> Result<Option<Message>, ServiceError> {
        Ok(self.store.find_message_by_id(id)?)
    }

    /// Deletes a message if it exists, returning the pre-deletion snapshot.
    /// Deleting a missing message is a no-op that returns `None`. A delete
    /// that reads the row but then removes nothing is reported as `None` as
    /// well, indistinguishable from a concurrent removal.
    pub fn delete_by_id(&self, id: i64) -> Result<Option<Message>, ServiceError> {
        let Some(message) = self.store.find_message_by_id(id)? else {
            return Ok(None);
        };

        if self.store.delete_message_by_id(id)? == 0 {
            return Ok(None);
        }
        debug!(id, "message deleted");
        Ok(Some(message))
    }

    /// Replaces a message's text. The new text obeys the same rules as
    /// creation; a zero-row update means the target never existed. Returns
    /// the post-update snapshot re-read from storage.
    pub fn update_text(&self, id: i64, new_text: &str) -> Result<Message, ServiceError> {
        validate_text(new_text)?;

        if self.store.update_message_text(id, new_text)? == 0 {
            return Err(ServiceError::NotFound("message does not exist"));
        }

        self.store
            .find_message_by_id(id)?
            .ok_or(ServiceError::NotFound("message does not exist"))
    }

    /// Lists an author's messages. Deliberately permissive: an unknown
    /// author and an author with no messages both yield an empty list.
    pub fn retrieve_all_for_author(&self, author_id: i64) -> Result<Vec<Message>, ServiceError> {
        Ok(self.store.find_messages_by_author(author_id)?)
    }
}

fn validate_text(text: &str) -> Result<(), ServiceError> {
    if text.trim().is_empty() {
        return Err(ServiceError::InvalidInput("message text must not be blank"));
    }
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(ServiceError::InvalidInput(
            "message text must be at most 255 characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountService;
    use crate::test_support::MemoryStore;
    use quill_types::models::Account;

    fn services() -> (AccountService, MessageService) {
        let store = Arc::new(MemoryStore::new());
        let accounts = AccountService::new(store.clone());
        let messages = MessageService::new(store, Arc::new(accounts.clone()));
        (accounts, messages)
    }

    fn register(accounts: &AccountService, username: &str) -> i64 {
        accounts
            .register(Account {
                id: None,
                username: username.into(),
                password: "secret".into(),
            })
            .unwrap()
            .id
            .unwrap()
    }

    fn new_message(author_id: i64, text: &str) -> NewMessage {
        NewMessage {
            author_id,
            text: text.into(),
            posted_at: None,
        }
    }

    #[test]
    fn create_stamps_id_and_posted_at() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        let created = messages.create(new_message(author, "hi")).unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.author_id, author);
        assert!(created.posted_at > 0);
    }

    #[test]
    fn create_keeps_caller_supplied_posted_at() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        let created = messages
            .create(NewMessage {
                author_id: author,
                text: "hi".into(),
                posted_at: Some(1_700_000_000),
            })
            .unwrap();
        assert_eq!(created.posted_at, 1_700_000_000);
    }

    #[test]
    fn create_rejects_blank_text() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        let err = messages.create(new_message(author, "   ")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[test]
    fn create_rejects_text_over_255_chars() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        let long = "x".repeat(256);
        let err = messages.create(new_message(author, &long)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let exactly_255 = "x".repeat(255);
        assert!(messages.create(new_message(author, &exactly_255)).is_ok());
    }

    #[test]
    fn create_rejects_unknown_author() {
        let (_, messages) = services();
        let err = messages.create(new_message(99, "hi")).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn retrieve_all_empty_store_yields_empty_list() {
        let (_, messages) = services();
        assert!(messages.retrieve_all().unwrap().is_empty());
    }

    #[test]
    fn retrieve_by_id_miss_is_not_an_error() {
        let (_, messages) = services();
        assert!(messages.retrieve_by_id(42).unwrap().is_none());
    }

    #[test]
    fn delete_missing_message_is_idempotent() {
        let (_, messages) = services();
        assert!(messages.delete_by_id(42).unwrap().is_none());
    }

    #[test]
    fn delete_returns_snapshot_and_removes_row() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");
        let created = messages.create(new_message(author, "hi")).unwrap();
        let id = created.id.unwrap();

        let deleted = messages.delete_by_id(id).unwrap().unwrap();
        assert_eq!(deleted, created);
        assert!(messages.retrieve_by_id(id).unwrap().is_none());
    }

    #[test]
    fn update_text_rejects_blank_and_leaves_message_unchanged() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");
        let created = messages.create(new_message(author, "hi")).unwrap();
        let id = created.id.unwrap();

        let err = messages.update_text(id, "").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        assert_eq!(messages.retrieve_by_id(id).unwrap().unwrap().text, "hi");
    }

    #[test]
    fn update_text_on_missing_message_is_not_found() {
        let (_, messages) = services();
        let err = messages.update_text(42, "hello").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn update_text_returns_post_update_snapshot() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");
        let created = messages.create(new_message(author, "hi")).unwrap();
        let id = created.id.unwrap();

        let updated = messages.update_text(id, "hello").unwrap();
        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.text, "hello");
        assert_eq!(updated.posted_at, created.posted_at);
    }

    #[test]
    fn author_listing_is_permissive() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        // No messages yet, and a nonexistent author: both empty, no failure.
        assert!(messages.retrieve_all_for_author(author).unwrap().is_empty());
        assert!(messages.retrieve_all_for_author(999).unwrap().is_empty());

        messages.create(new_message(author, "hi")).unwrap();
        let listed = messages.retrieve_all_for_author(author).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].text, "hi");
    }

    #[test]
    fn full_lifecycle_scenario() {
        let (accounts, messages) = services();
        let author = register(&accounts, "bob");

        let created = messages.create(new_message(author, "hi")).unwrap();
        let id = created.id.unwrap();

        assert_eq!(messages.retrieve_all_for_author(author).unwrap(), vec![created.clone()]);

        let updated = messages.update_text(id, "hello").unwrap();
        assert_eq!(updated.text, "hello");

        let deleted = messages.delete_by_id(id).unwrap().unwrap();
        assert_eq!(deleted.text, "hello");
        assert!(messages.retrieve_by_id(id).unwrap().is_none());
    }
}

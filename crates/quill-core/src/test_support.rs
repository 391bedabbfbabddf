//! In-memory implementation of the storage ports for service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use quill_types::models::{Account, Message};

use crate::ports::{AccountStore, MessageStore};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: BTreeMap<i64, Account>,
    messages: BTreeMap<i64, Message>,
    next_account_id: i64,
    next_message_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryStore {
    fn insert_account(&self, username: &str, password_hash: &str) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_account_id += 1;
        let id = inner.next_account_id;
        inner.accounts.insert(
            id,
            Account {
                id: Some(id),
                username: username.into(),
                password: password_hash.into(),
            },
        );
        Ok(id)
    }

    fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    fn find_account_by_id(&self, id: i64) -> Result<Option<Account>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.get(&id).cloned())
    }
}

impl MessageStore for MemoryStore {
    fn insert_message(&self, author_id: i64, text: &str, posted_at: i64) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_message_id += 1;
        let id = inner.next_message_id;
        inner.messages.insert(
            id,
            Message {
                id: Some(id),
                author_id,
                text: text.into(),
                posted_at,
            },
        );
        Ok(id)
    }

    fn find_all_messages(&self) -> Result<Vec<Message>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.messages.values().cloned().collect())
    }

    fn find_message_by_id(&self, id: i64) -> Result<Option<Message>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.messages.get(&id).cloned())
    }

    fn delete_message_by_id(&self, id: i64) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        Ok(usize::from(inner.messages.remove(&id).is_some()))
    }

    fn update_message_text(&self, id: i64, text: &str) -> Result<usize> {
        let mut inner = self.inner.lock().unwrap();
        match inner.messages.get_mut(&id) {
            Some(message) => {
                message.text = text.into();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn find_messages_by_author(&self, author_id: i64) -> Result<Vec<Message>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .messages
            .values()
            .filter(|m| m.author_id == author_id)
            .cloned()
            .collect())
    }
}

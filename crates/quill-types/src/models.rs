use serde::{Deserialize, Serialize};

/// A registered user identity. `id` is absent until the account has been
/// persisted and a row id generated for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
}

/// An authored text post tied to one account. Immutable after creation
/// except for `text`. `posted_at` is epoch seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub author_id: i64,
    pub text: String,
    pub posted_at: i64,
}

/// Input for message creation. `posted_at` may be omitted, in which case
/// the service stamps the current time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub author_id: i64,
    pub text: String,
    #[serde(default)]
    pub posted_at: Option<i64>,
}

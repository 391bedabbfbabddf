use serde::Deserialize;

// -- Messages --

/// PATCH /messages/{id} body. Only the text is mutable; any other fields
/// in the payload are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMessageText {
    pub text: String,
}

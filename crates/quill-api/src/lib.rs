pub mod accounts;
pub mod messages;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use quill_core::{AccountService, MessageService};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

/// Builds the full route table. Layers (CORS, tracing) are applied by the
/// server binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/messages", post(messages::create).get(messages::list_all))
        .route(
            "/messages/{id}",
            get(messages::get_by_id)
                .delete(messages::delete_by_id)
                .patch(messages::update_text),
        )
        .route("/accounts/{id}/messages", get(messages::list_for_author))
        .with_state(state)
}

//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::state::AppState;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Display name of the chat room users join.
    pub chat_room: String,
    /// Whether the Conversations client is configured.
    pub chat_enabled: bool,
}

/// Display the landing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    IndexTemplate {
        chat_room: state.config().chat_room.to_string(),
        chat_enabled: state.conversations().is_some(),
    }
}

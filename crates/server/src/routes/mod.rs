//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /        - Landing page with the join form
//! POST /login   - Issue an access token and join the chat room
//! GET  /health  - Liveness check (registered in `crate::app`)
//! ```

pub mod home;
pub mod login;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/login", post(login::login))
}

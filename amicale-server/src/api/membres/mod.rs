//! Member Directory API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/membres",
        get(handler::dispatch_get).post(handler::dispatch_post),
    )
}

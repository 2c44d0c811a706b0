//! Meetings API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/reunions",
        get(handler::dispatch_get)
            .post(handler::dispatch_post)
            .delete(handler::dispatch_delete),
    )
}

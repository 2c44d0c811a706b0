//! CSV export endpoints

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/exports/membres", get(handler::export_membres))
        .route("/api/exports/operations", get(handler::export_operations))
        .route("/api/exports/tresorier", get(handler::export_tresorier))
}

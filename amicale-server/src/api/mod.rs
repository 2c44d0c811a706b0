//! API route modules
//!
//! One module per endpoint family, each routing on the `action` query
//! parameter the mobile clients already speak:
//!
//! - [`membres`] - member directory
//! - [`reunions`] - meetings and attendance
//! - [`tresorier`] - treasurer operation ledger
//! - [`dashboard`] - role-shaped aggregate view
//! - [`exports`] - CSV downloads

pub mod dashboard;
pub mod exports;
pub mod membres;
pub mod reunions;
pub mod tresorier;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state).
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(membres::router())
        .merge(reunions::router())
        .merge(tresorier::router())
        .merge(dashboard::router())
        .merge(exports::router())
}

/// Build the fully configured application: routes, permissive CORS,
/// request tracing and request ids.
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the mobile clients call from anywhere, no auth layer
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}

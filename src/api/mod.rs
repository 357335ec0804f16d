//! API routing module
//!
//! # Structure
//!
//! - [`orders`] - order intake, listing and queue reset
//! - [`exports`] - spreadsheet download
//! - [`stats`] - submission statistics
//! - [`health`] - health check (public)
//!
//! Anything that is not an API route falls through to the static front-end
//! with an SPA index fallback.

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub mod exports;
pub mod health;
pub mod middleware;
pub mod orders;
pub mod stats;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all API routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(orders::router())
        .merge(exports::router())
        .merge(stats::router())
        .merge(health::router())
}

/// Build the fully configured application: routes, static front-end
/// fallback, middleware and state
pub fn build_app(state: &ServerState) -> Router {
    let static_dir = &state.config.static_dir;
    let spa = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    build_router()
        .fallback_service(spa)
        // CORS - the intake form may be served from elsewhere during development
        .layer(CorsLayer::permissive())
        // Request logging - outermost, executed first
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate x-request-id
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state.clone())
}

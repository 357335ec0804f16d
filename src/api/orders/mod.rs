//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/add-order", post(handler::create))
        .route("/api/reset-orders", post(handler::reset))
        .route("/orders", get(handler::list))
}

//! Statistics API handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::stats::StatsRecord;

/// GET /api/order-stats - rolling submission counters
///
/// Infallible: before any submission the record is all zeros.
pub async fn read(State(state): State<ServerState>) -> Json<StatsRecord> {
    Json(state.orders.get_stats())
}

//! Order API handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::orders::{Order, OrderSubmission};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/add-order - accept a new order submission
///
/// 400 with every missing field listed, 500 on persistence failure,
/// 200 with the created order otherwise.
pub async fn create(
    State(state): State<ServerState>,
    Json(submission): Json<OrderSubmission>,
) -> AppResult<Json<CreateOrderResponse>> {
    let order = state.orders.submit(submission)?;
    Ok(Json(CreateOrderResponse {
        message: "Order added successfully".into(),
        order,
    }))
}

/// GET /orders - current queue contents and size
pub async fn list(State(state): State<ServerState>) -> Json<OrderListResponse> {
    let orders = state.orders.list_orders();
    let count = orders.len();
    Json(OrderListResponse { orders, count })
}

/// POST /api/reset-orders - clear the queue (statistics are untouched)
pub async fn reset(State(state): State<ServerState>) -> AppResult<Json<MessageResponse>> {
    state.orders.reset_orders()?;
    Ok(Json(MessageResponse {
        message: "Orders have been reset.".into(),
    }))
}

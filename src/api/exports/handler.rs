//! Export API handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /api/download - export all pending orders as an xlsx attachment
///
/// 404 when the queue is empty (no file generated, no counter consumed).
/// A generation failure and a delivery failure are distinct 500s: by the
/// time reading the artifact back fails, the counter has already advanced.
pub async fn download(State(state): State<ServerState>) -> AppResult<Response> {
    let file = state.orders.export_orders()?;

    let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
        AppError::internal(format!(
            "Failed to read export {}: {}",
            file.path.display(),
            e
        ))
    })?;

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.file_name),
        ),
    ];

    Ok((headers, bytes).into_response())
}

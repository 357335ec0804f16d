//! Unified Result types

use crate::utils::AppError;

/// Application-level Result type
///
/// Used in HTTP handlers and orchestration logic
pub type AppResult<T> = Result<T, AppError>;

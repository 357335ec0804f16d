//! Utility module - shared error types, logging and helpers
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResult`] - application error type and result alias
//! - [`logger`] - tracing setup
//! - [`time`] - calendar keys in the business time zone
//! - [`validation`] - required-field helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::AppError;
pub use result::AppResult;

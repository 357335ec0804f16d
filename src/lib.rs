//! Shipdesk - shipment order intake service
//!
//! # Architecture overview
//!
//! A small REST service behind an order-intake form: submitters post shipment
//! details, operators read aggregate counts, export accumulated orders to an
//! `.xlsx` workbook, and reset the queue.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, state, HTTP server lifecycle
//! ├── orders/        # Order model, JSON-file store, intake service
//! ├── stats/         # Daily/monthly/yearly/lifetime submission counters
//! ├── export/        # Export counter and xlsx workbook generator
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # Error types, logging, time keys, validation
//! ```

pub mod api;
pub mod core;
pub mod export;
pub mod orders;
pub mod stats;
pub mod utils;

// Re-export public types
pub use self::core::{Config, Server, ServerState};
pub use export::{ExportCounter, ExportFile, ExportGenerator};
pub use orders::{Order, OrderService, OrderStore, OrderSubmission};
pub use stats::{StatsAggregator, StatsRecord};
pub use utils::{AppError, AppResult};

/// Set up the process environment: `.env`, then logging.
///
/// Must run before [`Config::from_env`] so `.env` values are visible.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(Some(&log_level), log_dir.as_deref());

    Ok(())
}

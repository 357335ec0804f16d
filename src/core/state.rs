use std::fs;
use std::path::Path;

use crate::core::Config;
use crate::export::{ExportCounter, ExportGenerator};
use crate::orders::{OrderService, OrderStore};
use crate::stats::StatsAggregator;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub orders: OrderService,
}

impl ServerState {
    /// Build the full component graph from configuration.
    ///
    /// Startup sequence:
    /// 1. Create `work_dir` and the export directory
    /// 2. Sweep stale `Orders_*.xlsx` artifacts from the export directory
    /// 3. Reset the export counter to 1 (numbering restarts on every boot)
    /// 4. Load orders and statistics from disk, tolerating corrupt state
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        fs::create_dir_all(&config.work_dir)?;
        let export_dir = config.export_dir();
        fs::create_dir_all(&export_dir)?;

        sweep_stale_exports(&export_dir);

        let store = OrderStore::open(config.orders_file());
        let stats = StatsAggregator::open(config.stats_file());
        let counter = ExportCounter::open(config.counter_file())?;
        let generator = ExportGenerator::new(export_dir, counter);
        let orders = OrderService::new(store, stats, generator);

        Ok(Self {
            config: config.clone(),
            orders,
        })
    }
}

/// Remove export artifacts left over from a previous run.
///
/// Only `Orders_*.xlsx` files are removed; `counter.txt` and anything else
/// in the directory is kept. Best-effort: a file that cannot be removed is
/// logged and skipped.
fn sweep_stale_exports(export_dir: &Path) {
    let entries = match fs::read_dir(export_dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot read export dir {}: {}", export_dir.display(), e);
            return;
        }
    };

    let mut removed = 0usize;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("Orders_") && name.ends_with(".xlsx") {
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!("Failed to remove stale export {}: {}", name, e),
            }
        }
    }

    if removed > 0 {
        tracing::info!("Removed {} stale export file(s)", removed);
    }
}

use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/shipdesk | Working directory for persisted state and exports |
/// | HTTP_PORT | 3001 | HTTP API port |
/// | STATIC_DIR | dist | Built front-end directory (SPA) |
/// | ENVIRONMENT | development | development \| staging \| production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/shipdesk HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding `orders.json`, `stats.json` and the export dir
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Directory of the built front-end, served as static files
    pub static_dir: String,
    /// Runtime environment label
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/shipdesk".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Directory that receives generated `Orders_<N>.xlsx` artifacts
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("exports")
    }

    /// Persisted order collection
    pub fn orders_file(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.json")
    }

    /// Persisted statistics record
    pub fn stats_file(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("stats.json")
    }

    /// Persisted export counter (lives inside the export dir, like the
    /// artifacts it numbers)
    pub fn counter_file(&self) -> PathBuf {
        self.export_dir().join("counter.txt")
    }
}

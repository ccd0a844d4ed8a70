//! Engine configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/kanvas | Working directory (database, logs) |
//! | LOG_LEVEL | info | Tracing filter level |
//! | MAX_IMPORT_ROWS | 10000 | Row cap per CSV upload |
//! | EVENT_BUS_CAPACITY | 64 | Broadcast channel capacity |

/// Engine configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the embedded database and log files
    pub work_dir: String,
    /// Tracing filter level: trace | debug | info | warn | error
    pub log_level: String,
    /// Maximum number of data rows accepted in one CSV upload
    pub max_import_rows: usize,
    /// Capacity of the engine event broadcast channel
    pub event_bus_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/kanvas".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            max_import_rows: std::env::var("MAX_IMPORT_ROWS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            event_bus_capacity: std::env::var("EVENT_BUS_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "/var/lib/kanvas".into(),
            log_level: "info".into(),
            max_import_rows: 10_000,
            event_bus_capacity: 64,
        }
    }
}

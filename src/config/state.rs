// Application state module
// Immutable per-process state shared by every request

use std::time::Duration;

use super::types::{Config, Roots};

/// Application state
pub struct AppState {
    pub config: Config,
    pub roots: Roots,
}

impl AppState {
    pub const fn new(config: Config, roots: Roots) -> Self {
        Self { config, roots }
    }

    /// Time allowed for a single file read before it counts as failed
    pub const fn file_read_timeout(&self) -> Duration {
        Duration::from_secs(self.config.performance.file_read_timeout)
    }
}

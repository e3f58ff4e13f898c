// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub roots: RootsConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level written to the logs (error, warn, info, debug)
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Seconds an idle connection waits for the next request; 0 disables keep-alive
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    /// Upper bound in seconds on reading a single file from disk
    pub file_read_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Base directories files are served from
#[derive(Debug, Deserialize, Clone)]
pub struct RootsConfig {
    /// Public assets served to browser clients
    pub static_dir: String,
    /// Alternate assets served to app clients
    pub interface_dir: String,
}

impl RootsConfig {
    /// Anchor both roots at `base`. Absolute directories are kept as they are.
    pub fn resolve(&self, base: &Path) -> Roots {
        Roots {
            static_root: base.join(&self.static_dir),
            interface_root: base.join(&self.interface_dir),
        }
    }
}

/// Roots after resolution against the startup working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub static_root: PathBuf,
    pub interface_root: PathBuf,
}

/// User-agent classification and app client redirection
#[derive(Debug, Deserialize, Clone)]
pub struct RoutingConfig {
    /// User-agent substrings that mark a request as coming from the app
    #[serde(default = "default_app_agents")]
    pub app_agents: Vec<String>,
    #[serde(default)]
    pub app_redirect: AppRedirect,
}

fn default_app_agents() -> Vec<String> {
    vec![
        "okhttp/3.15".to_string(),
        "okhttp/4.12".to_string(),
        "okhttp/4.50".to_string(),
    ]
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            app_agents: default_app_agents(),
            app_redirect: AppRedirect::default(),
        }
    }
}

/// Which app client requests are served from the interface root
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum AppRedirect {
    /// Only the listed request paths; everything else stays under the static root
    Paths { paths: Vec<String> },
    /// Every request path
    All,
    /// Every request is answered with `target` from the interface root
    Rewrite { target: String },
    /// No user-agent branching at all
    Disabled,
}

impl Default for AppRedirect {
    fn default() -> Self {
        Self::Paths {
            paths: vec!["/main.js".to_string()],
        }
    }
}

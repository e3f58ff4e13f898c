// Configuration module entry point
// Loads layered settings and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{AppRedirect, Config, Roots, RoutingConfig};

/// Config file used when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Prefix for environment overrides, e.g. `DUALROOT_SERVER__PORT=9000`
const ENV_PREFIX: &str = "DUALROOT";

/// Keys whose environment values are comma-separated lists
const ENV_LIST_KEYS: [&str; 2] = ["routing.app_agents", "routing.app_redirect.paths"];

/// Environment source: `DUALROOT_ROUTING__APP_AGENTS=okhttp/4.12,okhttp/5.0`
fn environment() -> config::Environment {
    let env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    ENV_LIST_KEYS
        .iter()
        .fold(env, |env, key| env.with_list_parse_key(key))
}

impl Config {
    /// Load configuration from the given file, environment and defaults.
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 5)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.file_read_timeout", 10)?
            .set_default("roots.static_dir", "static")?
            .set_default("roots.interface_dir", "interface")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

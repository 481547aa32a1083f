// Configuration module entry point
// Loads layered configuration and holds per-process runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, DatabaseConfig, HealthConfig, HttpConfig, LoggingConfig, PerformanceConfig,
    ServerConfig, SiteConfig,
};

/// Environment variable naming the config file (without extension)
const CONFIG_PATH_ENV: &str = "HOSPITAL_CONFIG";

impl Config {
    /// Load configuration from the path in `HOSPITAL_CONFIG`, or "config" by default
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Precedence, lowest first: defaults, the config file, `HOSPITAL__*`
    /// variables, then `DATABASE_URL` and `ROOT_PATH`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("HOSPITAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "hospital-site")?
            .set_default("http.enable_cors", false)?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("site.root_path", std::env::var("ROOT_PATH").ok())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

//! Server configuration
//!
//! Every item can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP listen port |
//! | DATABASE_PATH | amicale.db | SQLite database file |
//! | ENVIRONMENT | development | development / staging / production |
//! | LOG_LEVEL | info | tracing level |
//! | LOG_DIR | (unset) | daily-rolling log directory |

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API listen port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing level for the logger
    pub log_level: String,
    /// Optional log directory (daily rolling files when set)
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "amicale.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override database path and port, keeping the rest from the
    /// environment. Used by tests.
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

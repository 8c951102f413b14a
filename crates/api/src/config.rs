//! # API Configuration Module
//!
//! This module loads the configuration for the slotbook API server from
//! environment variables, with defaults where one makes sense.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8080)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `JWT_SECRET`: HMAC secret used to verify bearer tokens (required)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the slotbook API server
///
/// Built once by the binary and passed down explicitly. Nothing in the library
/// crates reads the environment on its own.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub max_connections: u32,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Secret for verifying HS256 bearer tokens
    pub jwt_secret: String,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `JWT_SECRET` is not set
    /// - `API_PORT` or `DATABASE_MAX_CONNECTIONS` cannot be parsed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Security settings
        let jwt_secret =
            env::var("JWT_SECRET").wrap_err("JWT_SECRET environment variable must be set")?;

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            log_level,
            cors_origins,
            jwt_secret,
            request_timeout,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a level name to a tracing level. Unknown names fall back to INFO.
pub fn parse_log_level(name: &str) -> Level {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

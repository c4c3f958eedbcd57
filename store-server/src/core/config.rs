use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Server configuration - all settings for the storefront backend
///
/// # Environment Variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/storefront | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | Runtime environment |
/// | STRIPE_SECRET_KEY | (unset) | Payment gateway API key |
/// | STRIPE_API_URL | https://api.stripe.com | Payment gateway base URL |
/// | JWT_SECRET | (generated in dev) | JWT signing secret |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Payment gateway secret key (unset = gateway disabled)
    pub stripe_secret_key: Option<String>,
    /// Payment gateway base URL (override for testing)
    pub stripe_api_url: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Falls back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            stripe_secret_key: std::env::var("STRIPE_SECRET_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            stripe_api_url: std::env::var("STRIPE_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".into()),
        }
    }

    /// Directory holding the embedded database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the working directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

//! Server configuration, from CLI flags or the environment.
//!
//! A `.env` file in the working directory is loaded before parsing, so every
//! flag can also be set there.

use std::path::PathBuf;

use clap::Args;

use dailydev_domain::shared::DomainError;
use dailydev_infrastructure::logging::{default_log_dir, LoggerOptions};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// HTTP bind address
    #[arg(long, env = "DAILYDEV_BIND", default_value = DEFAULT_BIND, global = true)]
    pub bind: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    pub database_url: Option<String>,

    /// HS256 secret shared with the auth service (at least 32 characters)
    #[arg(long, env = "DAILYDEV_JWT_SECRET", hide_env_values = true, global = true)]
    pub jwt_secret: Option<String>,

    /// Upper bound on pooled database connections
    #[arg(
        long,
        env = "DAILYDEV_DB_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        global = true
    )]
    pub max_connections: u32,

    /// Directory for the rolling JSON log [default: <data-local-dir>/dailydev/logs]
    #[arg(long, env = "DAILYDEV_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn database_url(&self) -> Result<&str, DomainError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                DomainError::InvalidInput(
                    "DATABASE_URL is required (or pass --database-url)".to_string(),
                )
            })
    }

    pub fn jwt_secret(&self) -> Result<&str, DomainError> {
        self.jwt_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidInput(
                    "DAILYDEV_JWT_SECRET is required (or pass --jwt-secret)".to_string(),
                )
            })
    }

    pub fn log_options(&self) -> LoggerOptions {
        LoggerOptions::new(self.log_dir.clone().unwrap_or_else(default_log_dir))
    }
}

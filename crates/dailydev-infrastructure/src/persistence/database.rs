use dailydev_domain::shared::DomainError;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::TimeoutConfig;

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, DomainError> {
        if database_url.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "Database URL cannot be empty".to_string(),
            ));
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(timeouts.db_acquire)
            .connect(database_url)
            .await
            .map_err(|e| DomainError::Infrastructure(format!("Failed to connect to database: {}", e)))?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

use dailydev_domain::shared::DomainError;
use log::error;
use sqlx::postgres::{PgArguments, PgQueryResult, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, PgPool, Postgres};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::error_mapping::map_sqlx_error;
use crate::config::TimeoutConfig;

/// Shared plumbing for PostgreSQL repositories: per-statement timeout,
/// error mapping and logging with an operation label.
#[derive(Clone)]
pub struct PgRepositoryBase {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgRepositoryBase {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            query_timeout: TimeoutConfig::global().db_query,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
        operation: &str,
    ) -> Result<PgQueryResult, DomainError> {
        self.run(query.execute(self.pool.as_ref()), operation).await
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: QueryAs<'q, Postgres, T, PgArguments>,
        operation: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        self.run(query.fetch_optional(self.pool.as_ref()), operation)
            .await
    }

    async fn run<F, T>(&self, fut: F, operation: &str) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("[db] {} failed: {}", operation, e);
                Err(map_sqlx_error(e))
            }
            Err(_) => {
                error!(
                    "[db] {} timed out after {}ms",
                    operation,
                    self.query_timeout.as_millis()
                );
                Err(DomainError::Timeout(format!(
                    "{} exceeded {}ms",
                    operation,
                    self.query_timeout.as_millis()
                )))
            }
        }
    }
}

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::presentation::auth::TokenService;
use crate::presentation::config::ServerConfig;
use crate::presentation::state::AppState;
use dailydev_domain::shared::{DomainError, SystemClock};
use dailydev_domain::streak::StreakRepository;
use dailydev_infrastructure::config::TimeoutConfig;
use dailydev_infrastructure::persistence::{
    repositories::PgStreakRepository, Database, PgRepositoryBase,
};

/// Open the connection pool, applying pending migrations when asked to.
pub async fn connect_database(
    config: &ServerConfig,
    timeouts: &TimeoutConfig,
    run_migrations: bool,
) -> Result<Database, DomainError> {
    let started_at = Instant::now();
    let db = Database::connect(config.database_url()?, config.max_connections, timeouts).await?;
    info!(
        max_connections = config.max_connections,
        "✓ Connected to database ({}ms)",
        started_at.elapsed().as_millis()
    );

    if run_migrations {
        let started_at = Instant::now();
        db.run_migrations().await?;
        info!(
            "✓ Migrations applied ({}ms)",
            started_at.elapsed().as_millis()
        );
    } else {
        info!("Skipping migrations");
    }

    Ok(db)
}

pub fn streak_repository(db: &Database, timeouts: &TimeoutConfig) -> Arc<dyn StreakRepository> {
    let base = PgRepositoryBase::new(Arc::new(db.pool().clone()))
        .with_query_timeout(timeouts.db_query);
    Arc::new(PgStreakRepository::with_base(base))
}

/// Wire repositories, handlers and the token service for `serve`.
pub fn build_app_state(
    config: &ServerConfig,
    db: &Database,
    timeouts: &TimeoutConfig,
) -> Result<AppState, DomainError> {
    let auth = TokenService::new(config.jwt_secret()?)?;
    let state = AppState::new(streak_repository(db, timeouts), Arc::new(SystemClock), auth);
    info!("✓ Application state ready");
    Ok(state)
}

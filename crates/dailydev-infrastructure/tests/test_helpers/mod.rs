use dailydev_infrastructure::config::TimeoutConfig;
use dailydev_infrastructure::persistence::Database;
use sqlx::PgPool;

/// Connect to the database named by `DATABASE_URL` and apply migrations.
///
/// Returns `None` when the variable is unset so the suite can run without PostgreSQL.
pub async fn setup_pg_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL integration test");
            return None;
        }
    };

    let db = Database::connect(&url, 2, &TimeoutConfig::default())
        .await
        .expect("connect to test database");
    db.run_migrations().await.expect("run migrations");

    Some(db.pool().clone())
}

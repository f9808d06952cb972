use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::persistence::PgRepositoryBase;
use dailydev_domain::shared::{DomainError, UserId};
use dailydev_domain::streak::{StreakRecord, StreakRepository};

#[derive(FromRow)]
struct StreakRow {
    user_id: String,
    streak_length: i32,
    longest_streak: i32,
    streak_start: Option<DateTime<Utc>>,
    streak_end: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl StreakRow {
    fn try_into_record(self) -> Result<StreakRecord, DomainError> {
        let streak_length = from_db_count(self.streak_length, "streak_length", &self.user_id)?;
        let longest_streak = from_db_count(self.longest_streak, "longest_streak", &self.user_id)?;

        StreakRecord::restore(
            UserId::from_string(&self.user_id),
            streak_length,
            longest_streak,
            self.streak_start,
            self.streak_end,
            self.updated_at,
        )
    }
}

fn from_db_count(value: i32, column: &str, user_id: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::DataIntegrity(format!(
            "Negative {} ({}) stored for user {}",
            column, value, user_id
        ))
    })
}

fn to_db_count(value: u32, column: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::Validation(format!("{} {} does not fit the column", column, value))
    })
}

pub struct PgStreakRepository {
    base: PgRepositoryBase,
}

impl PgStreakRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            base: PgRepositoryBase::new(pool),
        }
    }

    pub fn with_base(base: PgRepositoryBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl StreakRepository for PgStreakRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError> {
        let query = r#"
            SELECT user_id, streak_length, longest_streak, streak_start, streak_end, updated_at
            FROM user_streaks
            WHERE user_id = $1
        "#;

        let row: Option<StreakRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Find streak by user ID",
            )
            .await?;

        row.map(StreakRow::try_into_record).transpose()
    }

    async fn create(&self, record: &StreakRecord) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO user_streaks (
                user_id,
                streak_length,
                longest_streak,
                streak_start,
                streak_end,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO NOTHING
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(record.user_id().as_str())
                    .bind(to_db_count(record.streak_length(), "streak_length")?)
                    .bind(to_db_count(record.longest_streak(), "longest_streak")?)
                    .bind(record.streak_start())
                    .bind(record.streak_end())
                    .bind(record.updated_at()),
                "Create streak",
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_if_unchanged(
        &self,
        record: &StreakRecord,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE user_streaks SET
                streak_length = $2,
                longest_streak = $3,
                streak_start = $4,
                streak_end = $5,
                updated_at = $6
            WHERE user_id = $1 AND updated_at = $7
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(record.user_id().as_str())
                    .bind(to_db_count(record.streak_length(), "streak_length")?)
                    .bind(to_db_count(record.longest_streak(), "longest_streak")?)
                    .bind(record.streak_start())
                    .bind(record.streak_end())
                    .bind(record.updated_at())
                    .bind(expected_updated_at),
                "Update streak if unchanged",
            )
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

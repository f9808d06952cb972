use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StreakRecord;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait StreakRepository: Send + Sync {
    /// Find the streak record owned by a user.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError>;

    /// Insert a freshly provisioned record.
    ///
    /// Returns `false` without touching anything when the user already has one.
    async fn create(&self, record: &StreakRecord) -> Result<bool, DomainError>;

    /// Persist `record` only if the stored `updated_at` still equals
    /// `expected_updated_at` (the value the evaluation was based on).
    ///
    /// Returns `false` when another writer got there first.
    async fn update_if_unchanged(
        &self,
        record: &StreakRecord,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use dailydev_domain::shared::{DomainError, UserId};
use dailydev_domain::streak::{StreakRecord, StreakRepository};

/// In-memory streak store with the same conditional-write rules as the PostgreSQL one.
///
/// Reads yield to the scheduler after taking their snapshot, so callers
/// joined on one task interleave between read and write.
pub(crate) struct InMemoryStreakRepository {
    records: tokio::sync::RwLock<HashMap<String, StreakRecord>>,
    writes: tokio::sync::RwLock<usize>,
    rejected_writes: tokio::sync::RwLock<usize>,
}

impl InMemoryStreakRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: tokio::sync::RwLock::new(HashMap::new()),
            writes: tokio::sync::RwLock::new(0),
            rejected_writes: tokio::sync::RwLock::new(0),
        }
    }

    pub(crate) fn with_records(records: Vec<StreakRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|r| (r.user_id().as_str().to_string(), r))
            .collect();
        Self {
            records: tokio::sync::RwLock::new(map),
            writes: tokio::sync::RwLock::new(0),
            rejected_writes: tokio::sync::RwLock::new(0),
        }
    }

    pub(crate) async fn get(&self, user_id: &UserId) -> Option<StreakRecord> {
        self.records.read().await.get(user_id.as_str()).cloned()
    }

    /// Successful inserts and updates so far
    pub(crate) async fn write_count(&self) -> usize {
        *self.writes.read().await
    }

    /// Conditional updates refused because the row had moved on
    pub(crate) async fn rejected_write_count(&self) -> usize {
        *self.rejected_writes.read().await
    }
}

#[async_trait::async_trait]
impl StreakRepository for InMemoryStreakRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError> {
        let snapshot = self.get(user_id).await;
        tokio::task::yield_now().await;
        Ok(snapshot)
    }

    async fn create(&self, record: &StreakRecord) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let key = record.user_id().as_str().to_string();
        if records.contains_key(&key) {
            return Ok(false);
        }
        records.insert(key, record.clone());
        *self.writes.write().await += 1;
        Ok(true)
    }

    async fn update_if_unchanged(
        &self,
        record: &StreakRecord,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(record.user_id().as_str()) {
            Some(current) if current.updated_at() == expected_updated_at => {
                *current = record.clone();
                *self.writes.write().await += 1;
                Ok(true)
            }
            _ => {
                *self.rejected_writes.write().await += 1;
                Ok(false)
            }
        }
    }
}

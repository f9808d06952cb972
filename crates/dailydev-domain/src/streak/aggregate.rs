use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{calendar_day, StreakStatus};
use crate::shared::{DomainError, UserId};

/// Per-user reading streak.
///
/// Mutated only through [`StreakEvaluator`](super::StreakEvaluator); every
/// mutation keeps `longest_streak >= streak_length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    user_id: UserId,
    streak_length: u32,
    longest_streak: u32,
    streak_start: Option<DateTime<Utc>>,
    streak_end: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl StreakRecord {
    /// Fresh record created when the user registers. No activity yet.
    pub fn new(user_id: UserId, provisioned_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            streak_length: 0,
            longest_streak: 0,
            streak_start: None,
            streak_end: None,
            updated_at: provisioned_at,
        }
    }

    /// Restore a record from persistence, rejecting rows that break the invariant.
    pub fn restore(
        user_id: UserId,
        streak_length: u32,
        longest_streak: u32,
        streak_start: Option<DateTime<Utc>>,
        streak_end: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if longest_streak < streak_length {
            return Err(DomainError::DataIntegrity(format!(
                "longest_streak {} is below streak_length {} for user {}",
                longest_streak, streak_length, user_id
            )));
        }

        Ok(Self {
            user_id,
            streak_length,
            longest_streak,
            streak_start,
            streak_end,
            updated_at,
        })
    }

    pub(super) fn start(&mut self, now: DateTime<Utc>) {
        self.streak_length = 1;
        self.longest_streak = self.longest_streak.max(1);
        self.streak_start = Some(now);
        self.streak_end = Some(now);
        self.updated_at = now;
    }

    pub(super) fn extend(&mut self, now: DateTime<Utc>) {
        self.streak_length = self.streak_length.saturating_add(1);
        self.longest_streak = self.longest_streak.max(self.streak_length);
        if self.streak_start.is_none() {
            self.streak_start = Some(self.updated_at);
        }
        self.streak_end = Some(now);
        self.updated_at = now;
    }

    pub(super) fn reset(&mut self, now: DateTime<Utc>) {
        self.longest_streak = self.longest_streak.max(self.streak_length);
        self.start(now);
    }

    /// Whether any activity has ever been counted.
    pub fn has_activity(&self) -> bool {
        self.streak_length > 0
    }

    /// Calendar day of the last evaluation that changed this record.
    pub fn last_active_day(&self) -> NaiveDate {
        calendar_day(self.updated_at)
    }

    /// Where the streak stands at `now`, without changing anything.
    pub fn status_at(&self, now: DateTime<Utc>) -> StreakStatus {
        if !self.has_activity() {
            return StreakStatus::Inactive;
        }

        match (calendar_day(now) - self.last_active_day()).num_days() {
            gap if gap <= 0 => StreakStatus::ActiveToday,
            1 => StreakStatus::AtRisk,
            _ => StreakStatus::Broken,
        }
    }

    // Getters
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn streak_length(&self) -> u32 {
        self.streak_length
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn streak_start(&self) -> Option<DateTime<Utc>> {
        self.streak_start
    }

    pub fn streak_end(&self) -> Option<DateTime<Utc>> {
        self.streak_end
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

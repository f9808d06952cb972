use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dailydev_domain::streak::{StreakRecord, StreakStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakDto {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub streak_start: Option<DateTime<Utc>>,
    pub streak_end: Option<DateTime<Utc>>,
    pub last_active_date: Option<String>, // YYYY-MM-DD, UTC
    pub status: StreakStatus,
}

impl StreakDto {
    pub fn from_record(record: &StreakRecord, now: DateTime<Utc>) -> Self {
        Self {
            user_id: record.user_id().as_str().to_string(),
            current_streak: record.streak_length(),
            longest_streak: record.longest_streak(),
            streak_start: record.streak_start(),
            streak_end: record.streak_end(),
            last_active_date: record
                .has_activity()
                .then(|| record.last_active_day().format("%Y-%m-%d").to_string()),
            status: record.status_at(now),
        }
    }
}

/// Body of `201 Created` from `PUT /profile/update-streak`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStreakResponse {
    pub message: String,
    pub transition: String,
    pub streak: StreakDto,
}

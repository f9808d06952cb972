use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar day of an instant. UTC is the reference timezone for every user.
pub fn calendar_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// What an evaluation did to a streak record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreakTransition {
    /// Same calendar day (or clock skew), nothing to write.
    Unchanged,
    /// First activity on a freshly provisioned record.
    Started,
    /// Activity on the day after the last active day.
    Extended,
    /// At least one day was missed; a new streak begins today.
    Reset { missed_days: i64 },
}

impl StreakTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakTransition::Unchanged => "unchanged",
            StreakTransition::Started => "started",
            StreakTransition::Extended => "extended",
            StreakTransition::Reset { .. } => "reset",
        }
    }
}

/// Read-only view of where a streak stands relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    /// No activity has been recorded yet.
    Inactive,
    /// Already counted today.
    ActiveToday,
    /// Last active yesterday; today's activity extends the streak.
    AtRisk,
    /// A day was missed; the next activity starts over.
    Broken,
}

impl StreakStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreakStatus::Inactive => "inactive",
            StreakStatus::ActiveToday => "active_today",
            StreakStatus::AtRisk => "at_risk",
            StreakStatus::Broken => "broken",
        }
    }
}

impl std::fmt::Display for StreakStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_calendar_day_uses_utc_date() {
        let late = Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
        assert_eq!(
            calendar_day(late),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StreakStatus::ActiveToday.to_string(), "active_today");
        assert_eq!(StreakStatus::AtRisk.to_string(), "at_risk");
    }

    #[test]
    fn test_reset_transition_name_ignores_gap() {
        let reset = StreakTransition::Reset { missed_days: 4 };
        assert_eq!(reset.as_str(), "reset");
        assert_ne!(reset, StreakTransition::Reset { missed_days: 1 });
    }
}

use chrono::{DateTime, Utc};

use super::aggregate::StreakRecord;
use super::value_objects::{calendar_day, StreakTransition};

/// Outcome of evaluating a streak record at an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakEvaluation {
    pub next: StreakRecord,
    pub transition: StreakTransition,
}

impl StreakEvaluation {
    /// Whether `next` differs from the record that was evaluated and must be persisted.
    pub fn changed(&self) -> bool {
        self.transition != StreakTransition::Unchanged
    }
}

/// Domain service computing the next streak state.
/// Pure: no clock, no storage.
pub struct StreakEvaluator;

impl StreakEvaluator {
    /// Evaluate `previous` at `now`.
    ///
    /// The calendar-day gap decides the outcome, never the raw elapsed duration:
    /// - gap < 0 (clock skew): unchanged, even before any activity
    /// - no activity yet: the streak starts at 1, even on the provisioning day
    /// - gap == 0: unchanged
    /// - gap == 1: extended by one
    /// - gap > 1: reset to 1, carrying the old length into `longest_streak`
    pub fn evaluate(previous: &StreakRecord, now: DateTime<Utc>) -> StreakEvaluation {
        let mut next = previous.clone();
        let gap = Self::day_gap(previous.updated_at(), now);

        // A clock behind the last write never moves `updated_at` backwards.
        if gap < 0 {
            return StreakEvaluation {
                next,
                transition: StreakTransition::Unchanged,
            };
        }

        if !previous.has_activity() {
            next.start(now);
            return StreakEvaluation {
                next,
                transition: StreakTransition::Started,
            };
        }

        let transition = match gap {
            0 => StreakTransition::Unchanged,
            1 => {
                next.extend(now);
                StreakTransition::Extended
            }
            g => {
                next.reset(now);
                StreakTransition::Reset { missed_days: g - 1 }
            }
        };

        StreakEvaluation { next, transition }
    }

    /// Whole calendar days from `last` to `now`; negative under clock skew.
    pub fn day_gap(last: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        (calendar_day(now) - calendar_day(last)).num_days()
    }
}

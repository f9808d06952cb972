use dailydev_domain::shared::UserId;
use dailydev_domain::streak::StreakTransition;

use crate::application::dtos::StreakDto;

/// Count today's session toward the user's streak
#[derive(Debug, Clone)]
pub struct UpdateStreakCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateStreakResult {
    /// Already counted today; nothing was written
    Unchanged,
    Updated {
        streak: StreakDto,
        transition: StreakTransition,
    },
}

/// Create the empty streak record for a newly registered user
#[derive(Debug, Clone)]
pub struct ProvisionStreakCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStreakResult {
    pub created: bool,
}

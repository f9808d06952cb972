use log::info;
use std::sync::Arc;

use crate::application::dtos::StreakDto;
use dailydev_domain::shared::{Clock, DomainError, UserId};
use dailydev_domain::streak::StreakRepository;

pub struct StreakQueries {
    streak_repo: Arc<dyn StreakRepository>,
    clock: Arc<dyn Clock>,
}

impl StreakQueries {
    pub fn new(streak_repo: Arc<dyn StreakRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { streak_repo, clock }
    }

    /// Current streak for a user, with its status relative to today. Read-only.
    pub async fn get_streak(&self, user_id: &UserId) -> Result<StreakDto, DomainError> {
        let record = self
            .streak_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| DomainError::StreakNotFound(user_id.to_string()))?;

        let dto = StreakDto::from_record(&record, self.clock.now());

        info!(
            "[streak] get_streak user_id={} current={} longest={} status={}",
            dto.user_id, dto.current_streak, dto.longest_streak, dto.status
        );

        Ok(dto)
    }
}

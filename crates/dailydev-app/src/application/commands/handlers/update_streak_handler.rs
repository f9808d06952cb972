use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::streak_commands::*;
use crate::application::dtos::StreakDto;
use dailydev_domain::shared::{Clock, DomainError};
use dailydev_domain::streak::{StreakEvaluator, StreakRepository};

/// Evaluations retried after losing the conditional write to a concurrent request.
const MAX_ATTEMPTS: u32 = 3;

/// Update streak command handler
pub struct UpdateStreakCommandHandler {
    streak_repo: Arc<dyn StreakRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateStreakCommandHandler {
    pub fn new(streak_repo: Arc<dyn StreakRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { streak_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<UpdateStreakCommand> for UpdateStreakCommandHandler {
    type Result = UpdateStreakResult;

    async fn handle(&self, cmd: UpdateStreakCommand) -> Result<Self::Result, DomainError> {
        let user_id = cmd.user_id;

        for attempt in 1..=MAX_ATTEMPTS {
            // 1. Load the current record
            let previous = self
                .streak_repo
                .find_by_user_id(&user_id)
                .await?
                .ok_or_else(|| DomainError::StreakNotFound(user_id.to_string()))?;

            // 2. Evaluate against now
            let now = self.clock.now();
            if now < previous.updated_at() {
                warn!(
                    "[streak] clock behind last update user_id={} now={} updated_at={}",
                    user_id,
                    now.to_rfc3339(),
                    previous.updated_at().to_rfc3339()
                );
            }

            let evaluation = StreakEvaluator::evaluate(&previous, now);
            if !evaluation.changed() {
                info!(
                    "[streak] no update needed user_id={} current={}",
                    user_id,
                    previous.streak_length()
                );
                return Ok(UpdateStreakResult::Unchanged);
            }

            // 3. Persist only if nobody changed the row since we read it
            let applied = self
                .streak_repo
                .update_if_unchanged(&evaluation.next, previous.updated_at())
                .await?;

            if applied {
                info!(
                    "[streak] updated user_id={} transition={} current={} longest={}",
                    user_id,
                    evaluation.transition.as_str(),
                    evaluation.next.streak_length(),
                    evaluation.next.longest_streak()
                );

                return Ok(UpdateStreakResult::Updated {
                    streak: StreakDto::from_record(&evaluation.next, now),
                    transition: evaluation.transition,
                });
            }

            warn!(
                "[streak] concurrent update detected user_id={} attempt={}/{}",
                user_id, attempt, MAX_ATTEMPTS
            );
        }

        Err(DomainError::Conflict(format!(
            "Streak for user {} kept changing during {} attempts",
            user_id, MAX_ATTEMPTS
        )))
    }
}

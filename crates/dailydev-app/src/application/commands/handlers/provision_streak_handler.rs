use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::streak_commands::*;
use dailydev_domain::shared::{Clock, DomainError};
use dailydev_domain::streak::{StreakRecord, StreakRepository};

/// Provision streak command handler, run once per registration
pub struct ProvisionStreakCommandHandler {
    streak_repo: Arc<dyn StreakRepository>,
    clock: Arc<dyn Clock>,
}

impl ProvisionStreakCommandHandler {
    pub fn new(streak_repo: Arc<dyn StreakRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { streak_repo, clock }
    }
}

#[async_trait]
impl CommandHandler<ProvisionStreakCommand> for ProvisionStreakCommandHandler {
    type Result = ProvisionStreakResult;

    async fn handle(&self, cmd: ProvisionStreakCommand) -> Result<Self::Result, DomainError> {
        let record = StreakRecord::new(cmd.user_id, self.clock.now());
        let created = self.streak_repo.create(&record).await?;

        if created {
            info!("[streak] provisioned user_id={}", record.user_id());
        } else {
            info!(
                "[streak] already provisioned user_id={}",
                record.user_id()
            );
        }

        Ok(ProvisionStreakResult { created })
    }
}

use async_trait::async_trait;

use dailydev_domain::shared::DomainError;

/// Handles one command type
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    type Result: Send;

    async fn handle(&self, cmd: C) -> Result<Self::Result, DomainError>;
}

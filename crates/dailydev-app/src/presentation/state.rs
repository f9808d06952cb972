use std::sync::Arc;

use crate::application::commands::handlers::UpdateStreakCommandHandler;
use crate::application::queries::StreakQueries;
use crate::presentation::auth::TokenService;
use dailydev_domain::shared::Clock;
use dailydev_domain::streak::StreakRepository;

/// Command handlers container
pub struct CommandHandlers {
    pub update_streak: Arc<UpdateStreakCommandHandler>,
}

pub struct Queries {
    pub streak: Arc<StreakQueries>,
}

pub struct AppState {
    pub command_handlers: CommandHandlers,
    pub queries: Queries,
    pub auth: Arc<TokenService>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        streak_repo: Arc<dyn StreakRepository>,
        clock: Arc<dyn Clock>,
        auth: TokenService,
    ) -> Self {
        let command_handlers = CommandHandlers {
            update_streak: Arc::new(UpdateStreakCommandHandler::new(
                streak_repo.clone(),
                clock.clone(),
            )),
        };

        let queries = Queries {
            streak: Arc::new(StreakQueries::new(streak_repo, clock)),
        };

        Self {
            command_handlers,
            queries,
            auth: Arc::new(auth),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

mod provision_streak_handler;
mod update_streak_handler;


pub use provision_streak_handler::ProvisionStreakCommandHandler;
pub use update_streak_handler::UpdateStreakCommandHandler;

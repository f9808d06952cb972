pub mod command_handler;
pub mod handlers;
pub mod streak_commands;

pub use command_handler::CommandHandler;
pub use streak_commands::*;

// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod shared;
pub mod streak;

// Re-exports for convenience
pub use shared::{Clock, DomainError, SystemClock, UserId};

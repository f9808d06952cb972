mod aggregate;
mod evaluator;
mod repository;
mod value_objects;


pub use aggregate::StreakRecord;
pub use evaluator::{StreakEvaluation, StreakEvaluator};
pub use repository::StreakRepository;
pub use value_objects::{calendar_day, StreakStatus, StreakTransition};

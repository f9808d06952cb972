pub mod repositories;

mod database;
mod repository_base;
mod error_mapping;

pub use database::Database;
pub use repository_base::PgRepositoryBase;
pub use error_mapping::map_sqlx_error;

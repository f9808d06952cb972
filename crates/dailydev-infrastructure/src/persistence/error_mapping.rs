use dailydev_domain::shared::DomainError;

/// SQLSTATE class 23: integrity constraint violation.
const CONSTRAINT_VIOLATION_CLASS: &str = "23";

/// Map a sqlx error onto the domain taxonomy.
pub fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err
                .code()
                .is_some_and(|code| code.starts_with(CONSTRAINT_VIOLATION_CLASS)) =>
        {
            DomainError::ConstraintViolation(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut => {
            DomainError::Timeout("Timed out waiting for a database connection".to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DomainError::DataIntegrity(err.to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);

impl UserId {
    /// Parse an id coming from outside (token claims, CLI arguments).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInput(
                "User id cannot be empty".to_string(),
            ));
        }
        Ok(Self::from_string(trimmed))
    }
}

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1xxx)
    InvalidCredentials = 1001,
    ExpiredSession = 1002,

    // Resource Not Found (2xxx)
    StreakNotFound = 2002,

    // Business Logic (3xxx)
    StreakConflict = 3001,

    // Data & Persistence (4xxx)
    RepositoryError = 4001,
    DatabaseConstraintViolation = 4002,
    DataIntegrityError = 4003,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,
    TimeoutError = 5003,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::InvalidCredentials
            | ErrorCode::ExpiredSession
            | ErrorCode::StreakConflict
            | ErrorCode::TimeoutError => ErrorSeverity::Warning,

            ErrorCode::StreakNotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::RepositoryError
            | ErrorCode::DatabaseConstraintViolation
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,

            ErrorCode::DataIntegrityError => ErrorSeverity::Critical,
        }
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCode::TimeoutError | ErrorCode::StreakConflict)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Streak not found: {0}")]
    StreakNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Unauthorized(_) => ErrorCode::InvalidCredentials,
            DomainError::SessionExpired(_) => ErrorCode::ExpiredSession,
            DomainError::StreakNotFound(_) => ErrorCode::StreakNotFound,
            DomainError::Conflict(_) => ErrorCode::StreakConflict,
            DomainError::Persistence(_) => ErrorCode::RepositoryError,
            DomainError::ConstraintViolation(_) => ErrorCode::DatabaseConstraintViolation,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Timeout(_) => ErrorCode::TimeoutError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::Unauthorized(msg)
            | DomainError::SessionExpired(msg)
            | DomainError::StreakNotFound(msg)
            | DomainError::Conflict(msg)
            | DomainError::Persistence(msg)
            | DomainError::ConstraintViolation(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Timeout(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg) => msg,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_grouped_by_range() {
        assert_eq!(DomainError::Unauthorized("x".into()).code().code(), 1001);
        assert_eq!(DomainError::StreakNotFound("x".into()).code().code(), 2002);
        assert_eq!(DomainError::Conflict("x".into()).code().code(), 3001);
        assert_eq!(DomainError::Persistence("x".into()).code().code(), 4001);
        assert_eq!(DomainError::Timeout("x".into()).code().code(), 5003);
        assert_eq!(DomainError::InvalidInput("x".into()).code().code(), 6002);
    }

    #[test]
    fn test_only_transient_errors_are_recoverable() {
        assert!(DomainError::Timeout("slow".into()).is_recoverable());
        assert!(DomainError::Conflict("race".into()).is_recoverable());
        assert!(!DomainError::Persistence("down".into()).is_recoverable());
        assert!(!DomainError::StreakNotFound("u1".into()).is_recoverable());
    }

    #[test]
    fn test_format_with_code() {
        let err = DomainError::StreakNotFound("user-1".to_string());
        assert_eq!(err.format_with_code(), "[2002] Streak not found: user-1");
        assert_eq!(err.message(), "user-1");
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_user_id_parse_rejects_blank() {
        assert!(UserId::parse("   ").is_err());
        assert_eq!(UserId::parse(" 42 ").unwrap().as_str(), "42");
    }
}

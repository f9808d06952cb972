use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use dailydev_domain::shared::{DomainError, ErrorCode, ErrorSeverity};

/// Error body returned by every non-2xx response
///
/// - `code`: numeric error code (1xxx-6xxx range)
/// - `severity`: how loudly a client should surface it
/// - `recoverable`: whether retrying the same request can succeed
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub severity: ErrorSeverity,
    pub recoverable: bool,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    pub fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
            status: status_for(error_code),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::InfrastructureError, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidCredentials | ErrorCode::ExpiredSession => StatusCode::UNAUTHORIZED,
        ErrorCode::StreakNotFound => StatusCode::NOT_FOUND,
        ErrorCode::StreakConflict | ErrorCode::DatabaseConstraintViolation => StatusCode::CONFLICT,
        ErrorCode::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::ValidationError | ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::RepositoryError
        | ErrorCode::DataIntegrityError
        | ErrorCode::InfrastructureError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_code(err.code(), err.message())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(code = self.code, status = %self.status, "{}", self.message);
        }

        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_domain_error() {
        let err: ApiError = DomainError::StreakNotFound("reader-7".to_string()).into();

        assert_eq!(err.code, 2002);
        assert_eq!(err.message, "reader-7");
        assert_eq!(err.severity, ErrorSeverity::Info);
        assert!(!err.recoverable);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::SessionExpired("x".into()), StatusCode::UNAUTHORIZED),
            (DomainError::StreakNotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Conflict("x".into()), StatusCode::CONFLICT),
            (DomainError::ConstraintViolation("x".into()), StatusCode::CONFLICT),
            (DomainError::Persistence("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::DataIntegrity("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Infrastructure("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Timeout("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
        ];

        for (domain_err, status) in cases {
            let label = format!("{:?}", domain_err);
            assert_eq!(ApiError::from(domain_err).status(), status, "{}", label);
        }
    }

    #[test]
    fn test_body_omits_status() {
        let err = ApiError::infrastructure("pool closed");
        let body = serde_json::to_value(&err).unwrap();

        assert_eq!(body["code"], 5001);
        assert_eq!(body["message"], "pool closed");
        assert_eq!(body["severity"], "error");
        assert_eq!(body["recoverable"], false);
        assert!(body.get("status").is_none());
    }
}

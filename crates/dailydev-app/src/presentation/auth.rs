//! Session tokens.
//!
//! Identity arrives as an HS256 JWT whose `sub` claim is the user id, either
//! in `Authorization: Bearer <token>` or in the `access_token` cookie.

use std::time::Duration;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::presentation::error::ApiError;
use crate::presentation::state::SharedState;
use dailydev_domain::shared::{DomainError, UserId};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Not every issuer sets it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, DomainError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(DomainError::Validation(format!(
                "JWT secret must be at least {} characters",
                MIN_SECRET_LEN
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(
        &self,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| DomainError::InvalidInput("Token lifetime is too long".to_string()))?;

        let claims = Claims {
            sub: user_id.as_str().to_string(),
            iat: Some(issued_at.timestamp()),
            exp: issued_at.timestamp().saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Infrastructure(format!("Failed to sign token: {}", e)))
    }

    /// Validate signature and expiry, returning the user the token belongs to.
    pub fn verify(&self, token: &str) -> Result<UserId, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    DomainError::SessionExpired("Access token has expired".to_string())
                }
                _ => DomainError::Unauthorized(format!("Invalid access token: {}", e)),
            }
        })?;

        UserId::parse(&data.claims.sub)
            .map_err(|_| DomainError::Unauthorized("Access token has no subject".to_string()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == ACCESS_TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The user behind the request's access token. Rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    SharedState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = SharedState::from_ref(state);

        let token = bearer_token(&parts.headers)
            .or_else(|| cookie_token(&parts.headers))
            .ok_or_else(|| DomainError::Unauthorized("Missing access token".to_string()))?;

        let user_id = state.auth.verify(&token)?;
        Ok(AuthenticatedUser(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_short_secret_rejected() {
        assert!(matches!(
            TokenService::new("too-short"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new(SECRET).unwrap();
        let user_id = UserId::from_string("reader-42");

        let token = service
            .issue(&user_id, Utc::now(), Duration::from_secs(600))
            .unwrap();

        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_without_issued_at_is_accepted() {
        #[derive(Serialize)]
        struct MinimalClaims<'a> {
            sub: &'a str,
            exp: i64,
        }

        let token = encode(
            &Header::new(Algorithm::HS256),
            &MinimalClaims {
                sub: "external-reader",
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let service = TokenService::new(SECRET).unwrap();
        assert_eq!(
            service.verify(&token).unwrap(),
            UserId::from_string("external-reader")
        );
    }

    #[test]
    fn test_expired_token_is_session_expired() {
        let service = TokenService::new(SECRET).unwrap();
        let issued_at = Utc::now() - chrono::Duration::hours(2);

        let token = service
            .issue(&UserId::from_string("reader"), issued_at, Duration::from_secs(3600))
            .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(DomainError::SessionExpired(_))
        ));
    }

    #[test]
    fn test_foreign_signature_is_unauthorized() {
        let other = TokenService::new("ffffffffffffffffffffffffffffffff").unwrap();
        let token = other
            .issue(&UserId::from_string("reader"), Utc::now(), Duration::from_secs(60))
            .unwrap();

        let service = TokenService::new(SECRET).unwrap();
        assert!(matches!(
            service.verify(&token),
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            service.verify("not-a-jwt"),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_token_lookup_prefers_header_then_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(cookie_token(&headers), None);

        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; access_token=from-cookie"),
        );
        assert_eq!(cookie_token(&headers).as_deref(), Some("from-cookie"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("from-header"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}

//! Admin bearer-token verification.
//!
//! Credentials are never compared in this service. An external auth service issues
//! signed tokens and the roster routes only verify them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request once its token checks out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    pub subject: String,
}

pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AdminIdentity, AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("authorization header must use Bearer scheme")]
    InvalidScheme,
    #[error("token has expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token does not grant admin access")]
    Forbidden,
}

/// HS256 verifier sharing a secret with the issuing auth service.
#[derive(Clone)]
pub struct JwtVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mint a token. Only holders of the shared secret can do this.
    pub fn issue(&self, subject: &str, role: Role, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| AuthError::Invalid(err.to_string()))
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<AdminIdentity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<AdminClaims>(token, &self.decoding, &validation).map_err(|err| {
            match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Invalid(err.to_string()),
            }
        })?;

        if data.claims.role != Role::Admin {
            return Err(AuthError::Forbidden);
        }

        Ok(AdminIdentity {
            subject: data.claims.sub,
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::InvalidScheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_admin_token_verifies() {
        let verifier = JwtVerifier::new("test-secret");
        let token = verifier
            .issue("ops@shadi", Role::Admin, Duration::minutes(5))
            .expect("token issues");
        let identity = verifier.verify(&token).expect("token verifies");
        assert_eq!(identity.subject, "ops@shadi");
    }

    #[test]
    fn rejects_expired_foreign_and_non_admin_tokens() {
        let verifier = JwtVerifier::new("test-secret");

        let expired = verifier
            .issue("ops", Role::Admin, Duration::minutes(-5))
            .expect("token issues");
        assert_eq!(verifier.verify(&expired), Err(AuthError::Expired));

        let foreign = JwtVerifier::new("other-secret")
            .issue("ops", Role::Admin, Duration::minutes(5))
            .expect("token issues");
        assert!(matches!(
            verifier.verify(&foreign),
            Err(AuthError::Invalid(_))
        ));

        let staff = verifier
            .issue("clerk", Role::Staff, Duration::minutes(5))
            .expect("token issues");
        assert_eq!(verifier.verify(&staff), Err(AuthError::Forbidden));
    }

    #[test]
    fn bearer_token_requires_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(None), Err(AuthError::MissingHeader));
        assert_eq!(bearer_token(Some("Basic abc")), Err(AuthError::InvalidScheme));
        assert_eq!(bearer_token(Some("Bearer ")), Err(AuthError::InvalidScheme));
    }
}

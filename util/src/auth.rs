//! Access-token verification shared by the HTTP extractors and the notification gateway.
//!
//! Tokens are HS256 JWTs issued by the external auth provider. The claims carry the
//! subject id and the portal role.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::roles::Role;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub exp: usize,
}

/// A verified caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing access token")]
    MissingToken,
    #[error("invalid or expired token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("no signing secret configured")]
    MissingSecret,
}

/// Turns a raw credential into a verified identity.
pub trait CredentialVerifier: Send + Sync + 'static {
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}

/// HS256 verifier. Built from an empty secret it rejects every token.
pub struct JwtVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: (!secret.is_empty()).then(|| DecodingKey::from_secret(secret.as_bytes())),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Builds a verifier from the configured `JWT_SECRET`.
    pub fn from_config() -> Self {
        Self::new(&AppConfig::global().jwt_secret)
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let key = self.key.as_ref().ok_or(AuthError::MissingSecret)?;
        let data = decode::<Claims>(token, key, &self.validation)?;
        Ok(data.claims.into())
    }
}

/// Signs a token for `user_id` that expires after `duration_minutes`.
///
/// Production tokens come from the auth provider; this is used by tests and local tooling.
pub fn encode_token(
    user_id: i64,
    role: Role,
    secret: &str,
    duration_minutes: i64,
) -> Result<(String, String), AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let expiry = Utc::now() + Duration::minutes(duration_minutes);
    let claims = Claims {
        sub: user_id,
        role,
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expiry.to_rfc3339()))
}

/// Picks the credential out of a handshake: an explicit `token` parameter wins over
/// an `Authorization: Bearer ...` header. Blank values count as absent.
pub fn extract_bearer(query_token: Option<&str>, authorization: Option<&str>) -> Option<String> {
    if let Some(token) = query_token.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(token.to_string());
    }

    authorization
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

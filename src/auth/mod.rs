use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Payload signed into every session token. `id` is the subject (user) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Claims for `subject` expiring `expiry_hours` from now
    pub fn new(subject: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(JwtError::ExpiryOutOfRange(expiry_hours))?;

        Ok(Self {
            id: subject.into(),
            exp: Some(exp.timestamp()),
            iat: Some(now.timestamp()),
        })
    }

    /// Claims without an expiry, the shape issued by the signup/signin service
    pub fn non_expiring(subject: impl Into<String>) -> Self {
        Self {
            id: subject.into(),
            exp: None,
            iat: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime of {0} hours is out of range")]
    ExpiryOutOfRange(u64),

    #[error("Token has no subject id")]
    MissingSubject,
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify an HS256 token against `secret` and return its claims.
///
/// `exp` is optional, but when present it is enforced.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims = HashSet::new();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    if token_data.claims.id.is_empty() {
        return Err(JwtError::MissingSubject);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip_keeps_subject() {
        let token = generate_jwt(&Claims::new("u1", 1).unwrap(), SECRET).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.id, "u1");
        assert!(claims.exp.is_some());
    }

    #[test]
    fn huge_lifetime_is_an_error_not_a_panic() {
        assert!(matches!(
            Claims::new("u1", 10_000_000_000_000_000),
            Err(JwtError::ExpiryOutOfRange(10_000_000_000_000_000))
        ));
        assert!(matches!(Claims::new("u1", u64::MAX), Err(JwtError::ExpiryOutOfRange(_))));
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        let token = generate_jwt(&Claims::non_expiring("u2"), SECRET).unwrap();
        assert_eq!(verify_jwt(&token, SECRET).unwrap().id, "u2");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_jwt(&Claims::new("u1", 1).unwrap(), SECRET).unwrap();
        assert!(matches!(verify_jwt(&token, "other-secret"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            id: "u1".to_string(),
            exp: Some(Utc::now().timestamp() - 3600),
            iat: None,
        };
        let token = generate_jwt(&claims, SECRET).unwrap();
        assert!(verify_jwt(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_jwt("not.a.jwt", SECRET).is_err());
        assert!(verify_jwt("", SECRET).is_err());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let token = generate_jwt(&Claims::non_expiring(""), SECRET).unwrap();
        assert!(matches!(verify_jwt(&token, SECRET), Err(JwtError::MissingSubject)));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(generate_jwt(&Claims::non_expiring("u1"), ""), Err(JwtError::InvalidSecret)));
    }
}

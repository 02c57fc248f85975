//! Session token signing and validation
//!
//! Session tokens are compact JWTs signed with HS256 using a secret shared by
//! every process that needs to resolve the signed-in user. The subject claim
//! carries the numeric user id.
//!
//! Issuing tokens is the authentication collaborator's job; the blog service
//! only validates them (the binary exposes an `issue-session` command for
//! operators).
//!
//! ## Usage
//!
//! ```rust
//! use crypto_core::SessionKeys;
//!
//! let keys = SessionKeys::from_secret(b"a long random secret", 24).unwrap();
//! let token = keys.issue(7).unwrap();
//! assert_eq!(keys.user_id(&token).unwrap(), 7);
//! ```

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;
const SESSION_TOKEN_TYPE: &str = "session";

/// Minimum secret length accepted for signing.
pub const MIN_SECRET_LEN: usize = 16;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id as decimal string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Always "session"
    pub token_type: String,
}

/// Signing material for session tokens
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[REDACTED]")
            .field("ttl_hours", &self.ttl.num_hours())
            .finish()
    }
}

impl SessionKeys {
    /// Build keys from a shared secret.
    ///
    /// Fails when the secret is shorter than [`MIN_SECRET_LEN`] bytes or the
    /// lifetime is not positive.
    pub fn from_secret(secret: &[u8], ttl_hours: i64) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(anyhow!(
                "Session secret must be at least {MIN_SECRET_LEN} bytes"
            ));
        }
        if ttl_hours <= 0 {
            return Err(anyhow!("Session lifetime must be positive, got {ttl_hours}h"));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        })
    }

    /// Issue a session token for `user_id`, valid for the configured lifetime.
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
            token_type: SESSION_TOKEN_TYPE.to_string(),
        };

        encode(&Header::new(SESSION_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| anyhow!("Failed to sign session token: {e}"))
    }

    /// Validate signature, expiry and token type.
    pub fn validate(&self, token: &str) -> Result<TokenData<Claims>> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| anyhow!("Session validation failed: {e}"))?;

        if data.claims.token_type != SESSION_TOKEN_TYPE {
            return Err(anyhow!(
                "Unexpected token type: {}",
                data.claims.token_type
            ));
        }

        Ok(data)
    }

    /// Resolve the user id carried by a valid token.
    pub fn user_id(&self, token: &str) -> Result<i64> {
        let data = self.validate(token)?;
        data.claims
            .sub
            .parse::<i64>()
            .map_err(|e| anyhow!("Invalid user id in session token: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-session-secret-0123456789";

    fn keys() -> SessionKeys {
        SessionKeys::from_secret(SECRET, 24).unwrap()
    }

    #[test]
    fn issued_token_resolves_user() {
        let keys = keys();
        let token = keys.issue(42).unwrap();

        assert_eq!(token.matches('.').count(), 2);
        assert_eq!(keys.user_id(&token).unwrap(), 42);
        assert_eq!(keys.validate(&token).unwrap().claims.token_type, "session");
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(SessionKeys::from_secret(b"short", 24).is_err());
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        assert!(SessionKeys::from_secret(SECRET, 0).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let token = keys
            .issue_at(7, Utc::now() - Duration::hours(48))
            .unwrap();

        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = SessionKeys::from_secret(b"another-secret-abcdefghijkl", 24).unwrap();
        let token = other.issue(7).unwrap();

        assert!(keys().user_id(&token).is_err());
    }

    #[test]
    fn debug_output_redacts_secret() {
        let rendered = format!("{:?}", keys());
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("test-session-secret"));
    }
}

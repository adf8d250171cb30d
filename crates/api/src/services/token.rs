//! Signed, time-limited session tokens.
//!
//! Tokens are HS256 JWTs signed with the server-held `ACCESS_TOKEN_SECRET`
//! and expire one hour after issuance. Issuance is stateless; no record of
//! issued tokens is kept anywhere.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use bistro_core::{Email, Role};

/// Token validity window in seconds (1 hour).
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Errors from token issuance or verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing or claim serialization failed.
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Verification failed. Malformed, badly signed, and expired tokens are
    /// deliberately indistinguishable to the caller.
    #[error("invalid or expired token")]
    InvalidOrExpired,
}

/// Identity claims embedded in a session token.
///
/// `role` is whatever the caller supplied at issuance and is informational
/// only; admin checks re-read the stored role (see `middleware::auth`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The identified user's email.
    pub email: Email,
    /// Caller-supplied role claim, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds), issuance time + 1 hour.
    pub exp: i64,
}

/// Issues and verifies session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Build a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a signed token embedding the given identity.
    ///
    /// The claims are not validated beyond being serializable; expiry is
    /// fixed at one hour from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if signing fails.
    pub fn issue(&self, email: Email, role: Option<Role>) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            email,
            role,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Sign)
    }

    /// Verify a token and return its embedded claims.
    ///
    /// Pure and side-effect-free. Signature mismatches, garbage input, and
    /// expired tokens all collapse into the single
    /// [`TokenError::InvalidOrExpired`] outcome.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidOrExpired` on any verification failure.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is invalid the second the window closes.
        validation.leeway = 0;

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidOrExpired)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&SecretString::from("kX9#mP2$vQ7!nR4@wT8^zL5&cF3*hJ6%"))
    }

    fn email() -> Email {
        Email::parse("a@x.com").unwrap()
    }

    #[test]
    fn test_verify_roundtrip() {
        let svc = service();
        let token = svc.issue(email(), Some(Role::User)).unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.email, email());
        assert_eq!(claims.role, Some(Role::User));
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_verify_roundtrip_without_role() {
        let svc = service();
        let token = svc.issue(email(), None).unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.email, email());
        assert_eq!(claims.role, None);
    }

    #[test]
    fn test_verify_rejects_expired() {
        let svc = service();

        // A validly-signed token whose window closed a minute ago.
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: email(),
            role: None,
            iat: now - TOKEN_TTL_SECS - 60,
            exp: now - 60,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"kX9#mP2$vQ7!nR4@wT8^zL5&cF3*hJ6%"),
        )
        .unwrap();

        assert!(matches!(
            svc.verify(&token),
            Err(TokenError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_signature() {
        let other = TokenService::new(&SecretString::from("qW3$eR5!tY7@uI9#oP1^aS2&dF4*gH6%"));
        let token = other.issue(email(), Some(Role::Admin)).unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(TokenError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let svc = service();
        let mut token = svc.issue(email(), None).unwrap();
        // Corrupt the signature segment.
        token.push_str("AA");

        assert!(matches!(
            svc.verify(&token),
            Err(TokenError::InvalidOrExpired)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            service().verify("not-a-token"),
            Err(TokenError::InvalidOrExpired)
        ));
    }
}

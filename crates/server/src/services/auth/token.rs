//! Signed login credentials.
//!
//! A login issues a compact signed token (JWT, HS256) carrying the user's
//! identity. The token is self-contained: verification needs only the
//! signing secret, no server-side session row. Tokens expire after seven
//! days; expiry and every other verification failure resolve to "anonymous"
//! rather than a distinct error, so a tampered cookie behaves exactly like
//! a missing one.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use cedar_market_core::{Role, UserId};

use crate::models::User;

/// Credential lifetime in seconds (seven days).
pub const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims embedded in a signed credential.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: i32,
    /// Email at issue time.
    pub email: String,
    /// Display name at issue time.
    pub name: String,
    /// Role at issue time. Gates re-check the database, so a demotion
    /// takes effect before the token expires.
    pub role: Role,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

impl Claims {
    /// The subject as a typed user ID.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Issues and verifies signed login credentials.
#[derive(Clone)]
pub struct AuthTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl AuthTokens {
    /// Build a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a seven-day credential for a user.
    ///
    /// # Errors
    ///
    /// Returns `jsonwebtoken::errors::Error` if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.as_i32(),
            email: user.email.as_str().to_owned(),
            name: user.name.clone(),
            role: user.role,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify a credential, returning its claims.
    ///
    /// Any failure (bad signature, malformed token, expired) returns `None`;
    /// callers treat that as an anonymous request.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use cedar_market_core::{Email, Role, UserStatus};

    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens::new(&SecretString::from(
            "correct-horse-battery-staple-0123456789ab",
        ))
    }

    fn sample_user() -> User {
        User {
            id: UserId::new(42),
            name: "Dana".to_owned(),
            email: Email::parse("dana@example.com").unwrap(),
            phone: None,
            address: None,
            role: Role::Customer,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let tokens = tokens();
        let token = tokens.issue(&sample_user()).unwrap();

        let claims = tokens.verify(&token).expect("token should verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "dana@example.com");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn garbage_token_is_anonymous() {
        assert!(tokens().verify("not-a-token").is_none());
        assert!(tokens().verify("").is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_anonymous() {
        let token = tokens().issue(&sample_user()).unwrap();

        let other = AuthTokens::new(&SecretString::from(
            "a-completely-different-secret-0123456789",
        ));
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn expired_token_is_anonymous() {
        let iat = Utc::now().timestamp() - 8 * 24 * 60 * 60;
        let claims = Claims {
            sub: 42,
            email: "dana@example.com".to_owned(),
            name: "Dana".to_owned(),
            role: Role::Customer,
            iat,
            exp: iat + TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("correct-horse-battery-staple-0123456789ab".as_bytes()),
        )
        .unwrap();

        assert!(tokens().verify(&token).is_none());
    }

    #[test]
    fn tampered_token_is_anonymous() {
        let token = tokens().issue(&sample_user()).unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);
        assert!(tokens().verify(&tampered).is_none());
    }
}

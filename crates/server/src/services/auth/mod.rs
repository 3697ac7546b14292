//! Authentication service.
//!
//! Password registration and login, plus the signed-credential machinery
//! in [`token`].

mod error;
mod token;

pub use error::AuthError;
pub use token::{AuthTokens, Claims, TOKEN_TTL_SECS};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use cedar_market_core::{Email, UserId, UserStatus};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles user registration, login, and password changes.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if the name is empty.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name is required"));
        }

        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(name, &email, &password_hash, phone, address)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// Password verification runs before the blocked check, so the error
    /// never reveals whether a blocked account's password was correct.
    /// An email that cannot even parse is treated the same as a wrong
    /// password rather than surfacing a format error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::Blocked` if the account is blocked.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let (user, password_hash) = self
            .users
            .get_by_email_with_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if user.status == UserStatus::Blocked {
            return Err(AuthError::Blocked);
        }

        Ok(user)
    }

    /// Change a user's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the current password is wrong.
    /// Returns `AuthError::WeakPassword` if the new password is too weak.
    pub async fn change_password(
        &self,
        user_id: UserId,
        email: &Email,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let (_, password_hash) = self
            .users
            .get_by_email_with_hash(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(current_password, &password_hash)?;
        validate_password(new_password)?;

        let new_hash = hash_password(new_password)?;
        self.users.set_password_hash(user_id, &new_hash).await?;

        Ok(())
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn hash_verifies_and_rejects_wrong_password() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    // Lazy pool: login rejects the email before any query runs, so no
    // database is needed here.
    #[tokio::test]
    async fn malformed_login_email_is_invalid_credentials() {
        let pool = PgPool::connect_lazy("postgres://localhost/cedar_market").unwrap();
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.login("not-an-email", "whatever-password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}

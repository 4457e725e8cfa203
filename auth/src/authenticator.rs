use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default access token validity (1 day).
pub const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Default refresh token validity (30 days).
pub const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 30;

/// Authentication coordinator combining password hashing and session tokens.
///
/// Holds two independent JWT handlers: a short-lived access token handler and
/// a long-lived refresh token handler, each with its own secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: JwtHandler,
    refresh_tokens: JwtHandler,
}

/// Access and refresh token issued together at login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token
    pub access_token: String,
    /// Long-lived token used only to mint new access tokens
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default lifetimes and bcrypt cost.
    ///
    /// # Arguments
    /// * `access_secret` - Secret key for access token signing
    /// * `refresh_secret` - Secret key for refresh token signing
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self::with_lifetimes(
            access_secret,
            Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS),
            refresh_secret,
            Duration::days(REFRESH_TOKEN_LIFETIME_DAYS),
        )
    }

    /// Create an authenticator with explicit token lifetimes.
    pub fn with_lifetimes(
        access_secret: &[u8],
        access_lifetime: Duration,
        refresh_secret: &[u8],
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: JwtHandler::new(access_secret, access_lifetime),
            refresh_tokens: JwtHandler::new(refresh_secret, refresh_lifetime),
        }
    }

    /// Use a specific password hasher (e.g. a lower bcrypt cost in tests).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a fresh access/refresh token pair for a subject.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token_pair(&self, subject: impl ToString) -> Result<TokenPair, JwtError> {
        let subject = subject.to_string();

        Ok(TokenPair {
            access_token: self.access_tokens.issue(&subject)?,
            refresh_token: self.refresh_tokens.issue(&subject)?,
        })
    }

    /// Issue an access token only. Used by the refresh flow.
    pub fn generate_access_token(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.access_tokens.issue(subject)
    }

    /// Validate an access token and return its claims.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.access_tokens.decode(token)
    }

    /// Validate a refresh token and return its claims.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.refresh_tokens.decode(token)
    }

    /// Refresh token validity period.
    pub fn refresh_token_lifetime(&self) -> Duration {
        self.refresh_tokens.lifetime()
    }
}

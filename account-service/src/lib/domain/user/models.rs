use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// Avatar assigned to accounts that never uploaded one.
pub const DEFAULT_AVATAR: &str =
    "https://res.cloudinary.com/devatchannel/image/upload/v1602752402/avatar/avatar_cugq40.png";

/// Gender stored when the client does not send one.
pub const DEFAULT_GENDER: &str = "male";

/// Shortest accepted plaintext password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// User aggregate entity.
///
/// `followers` and `following` hold ids only; see `ExpandedUser` for the
/// populated form.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub fullname: String,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub gender: String,
    pub avatar: String,
    pub followers: Vec<UserId>,
    pub following: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalized username.
///
/// Always lowercase with every whitespace character removed, so
/// "Jane Doe", "jane doe" and "JANEDOE" are the same account name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Normalize and wrap a raw username.
    ///
    /// # Errors
    /// * `Empty` - Nothing is left after removing whitespace
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameError> {
        let normalized: String = username
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. The address is
/// stored as given; lookups are exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Related account as shown inside another user's followers/following lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub avatar: String,
    pub username: Username,
    pub fullname: String,
    pub followers: Vec<UserId>,
    pub following: Vec<UserId>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            avatar: user.avatar.clone(),
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            followers: user.followers.clone(),
            following: user.following.clone(),
        }
    }
}

/// User with followers and following populated as summaries.
#[derive(Debug, Clone)]
pub struct ExpandedUser {
    pub user: User,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

/// Access and refresh token minted for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Command to register a new account.
///
/// Fields are raw client input; the service normalizes and validates them.
#[derive(Debug)]
pub struct RegisterCommand {
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
}

/// Command to log in with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub tokens: SessionTokens,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub user: ExpandedUser,
    pub tokens: SessionTokens,
}

/// Result of trading a refresh token for a new access token.
#[derive(Debug, Clone)]
pub struct RenewedAccess {
    pub user: ExpandedUser,
    pub access_token: String,
}

use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("User name cannot be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Coarse classification of a `UserError`, used by inbound adapters to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    InvalidInput,
    Conflict,
    Unauthorized,
    NotFound,
    Internal,
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Input validation errors
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid user name: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password must be at least {min} characters.")]
    PasswordTooShort { min: usize },

    // Uniqueness conflicts
    #[error("This user name already exists.")]
    UsernameAlreadyExists(String),

    #[error("This email already exists.")]
    EmailAlreadyExists(String),

    // Credential and session errors
    #[error("Password is incorrect.")]
    IncorrectPassword,

    #[error("Please login now.")]
    LoginRequired,

    #[error("Invalid Authentication.")]
    InvalidAccessToken,

    // Lookups
    #[error("This email does not exist.")]
    EmailNotFound(String),

    #[error("This does not exist.")]
    NotFound(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    pub fn class(&self) -> ErrorClass {
        match self {
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::PasswordTooShort { .. } => ErrorClass::InvalidInput,
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ErrorClass::Conflict
            }
            UserError::IncorrectPassword
            | UserError::LoginRequired
            | UserError::InvalidAccessToken => ErrorClass::Unauthorized,
            UserError::EmailNotFound(_) | UserError::NotFound(_) => ErrorClass::NotFound,
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ErrorClass::Internal,
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}

use async_trait::async_trait;

use crate::domain::user::models::ExpandedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginSession;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::RenewedAccess;
use crate::domain::user::models::SessionTokens;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for account authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a new account and open a session for it.
    ///
    /// # Arguments
    /// * `command` - Raw registration input
    ///
    /// # Returns
    /// Created user and a fresh token pair
    ///
    /// # Errors
    /// * `InvalidUsername` / `InvalidEmail` - Malformed input
    /// * `UsernameAlreadyExists` - Normalized username is taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PasswordTooShort` - Password has fewer than 6 characters
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Registration, UserError>;

    /// Check credentials and open a session.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// User with expanded relations and a fresh token pair
    ///
    /// # Errors
    /// * `EmailNotFound` - No account for this email
    /// * `IncorrectPassword` - Password does not match the stored hash
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginSession, UserError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token itself is not rotated.
    ///
    /// # Arguments
    /// * `refresh_token` - Token previously issued at login or registration
    ///
    /// # Returns
    /// User with expanded relations and a new access token
    ///
    /// # Errors
    /// * `LoginRequired` - Token is invalid, tampered with, or expired
    /// * `NotFound` - The account behind the token no longer exists
    async fn refresh_access_token(&self, refresh_token: &str)
        -> Result<RenewedAccess, UserError>;

    /// Resolve an access token to the user id it was issued for.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Token is invalid or expired
    async fn authenticate(&self, access_token: &str) -> Result<UserId, UserError>;

    /// Load a user with expanded relations.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<ExpandedUser, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier, `None` if absent.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized username, `None` if absent.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by exact email address, `None` if absent.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Load summaries for the given ids.
    ///
    /// Missing ids are skipped without error.
    async fn find_summaries(&self, ids: &[UserId]) -> Result<Vec<UserSummary>, UserError>;
}

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, UserError>;

    /// Returns `Ok(false)` on mismatch; errors are reserved for unreadable hashes.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, UserError>;
}

/// Signed session token issuance and verification.
pub trait TokenIssuer: Send + Sync + 'static {
    fn issue_session(&self, user_id: &UserId) -> Result<SessionTokens, UserError>;

    fn issue_access_token(&self, user_id: &UserId) -> Result<String, UserError>;

    /// # Errors
    /// * `InvalidAccessToken` - Signature, expiry or subject check failed
    fn verify_access_token(&self, token: &str) -> Result<UserId, UserError>;

    /// # Errors
    /// * `LoginRequired` - Signature, expiry or subject check failed
    fn verify_refresh_token(&self, token: &str) -> Result<UserId, UserError>;
}

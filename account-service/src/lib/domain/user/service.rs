use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::ExpandedUser;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginSession;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::Registration;
use crate::domain::user::models::RenewedAccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::models::DEFAULT_AVATAR;
use crate::domain::user::models::MIN_PASSWORD_LENGTH;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenIssuer;
use crate::user::ports::UserRepository;

/// Domain service implementation for account authentication.
///
/// Stateless apart from its injected collaborators, so one instance is shared
/// by every request.
pub struct AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    password_hasher: Arc<PH>,
    token_issuer: Arc<TI>,
}

impl<UR, PH, TI> AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Password hashing implementation
    /// * `token_issuer` - Access/refresh token signing implementation
    pub fn new(repository: Arc<UR>, password_hasher: Arc<PH>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            password_hasher,
            token_issuer,
        }
    }

    // bcrypt is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?
    }

    async fn expand(&self, user: User) -> Result<ExpandedUser, UserError> {
        let followers = self.repository.find_summaries(&user.followers).await?;
        let following = self.repository.find_summaries(&user.following).await?;

        Ok(ExpandedUser {
            user,
            followers,
            following,
        })
    }
}

#[async_trait]
impl<UR, PH, TI> AuthServicePort for AuthService<UR, PH, TI>
where
    UR: UserRepository,
    PH: PasswordHasher,
    TI: TokenIssuer,
{
    async fn register(&self, command: RegisterCommand) -> Result<Registration, UserError> {
        let username = Username::new(&command.username)?;
        let email = EmailAddress::new(command.email)?;

        if self.repository.find_by_username(&username).await?.is_some() {
            tracing::warn!(username = %username, "Registration rejected: user name taken");
            return Err(UserError::UsernameAlreadyExists(username.to_string()));
        }

        if self
            .repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(username = %username, "Registration rejected: email taken");
            return Err(UserError::EmailAlreadyExists(email.as_str().to_string()));
        }

        if command.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            fullname: command.fullname,
            username,
            email,
            password_hash,
            gender: command.gender,
            avatar: DEFAULT_AVATAR.to_string(),
            followers: Vec::new(),
            following: Vec::new(),
            created_at: Utc::now(),
        };

        let user = self.repository.create(user).await?;
        let tokens = self.token_issuer.issue_session(&user.id)?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Registration { user, tokens })
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginSession, UserError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| UserError::EmailNotFound(command.email.clone()))?;

        let matches = self
            .verify_password(command.password, user.password_hash.clone())
            .await?;
        if !matches {
            tracing::warn!(user_id = %user.id, "Login rejected: incorrect password");
            return Err(UserError::IncorrectPassword);
        }

        let tokens = self.token_issuer.issue_session(&user.id)?;
        let user = self.expand(user).await?;

        tracing::info!(user_id = %user.user.id, "User logged in");

        Ok(LoginSession { user, tokens })
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RenewedAccess, UserError> {
        let user_id = self.token_issuer.verify_refresh_token(refresh_token)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| UserError::NotFound(user_id.to_string()))?;

        let access_token = self.token_issuer.issue_access_token(&user.id)?;
        let user = self.expand(user).await?;

        tracing::debug!(user_id = %user_id, "Access token renewed");

        Ok(RenewedAccess { user, access_token })
    }

    async fn authenticate(&self, access_token: &str) -> Result<UserId, UserError> {
        self.token_issuer.verify_access_token(access_token)
    }

    async fn get_profile(&self, id: &UserId) -> Result<ExpandedUser, UserError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        self.expand(user).await
    }
}

//! Adapters binding the domain's hashing and token ports to the `auth` library.

use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::user::models::SessionTokens;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::PasswordHasher;
use crate::user::ports::TokenIssuer;

impl PasswordHasher for Authenticator {
    fn hash(&self, password: &str) -> Result<String, UserError> {
        self.hash_password(password)
            .map_err(|e| UserError::Password(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        match self.verify_password(password, hash) {
            Ok(()) => Ok(true),
            Err(AuthenticationError::InvalidCredentials) => Ok(false),
            Err(e) => Err(UserError::Password(e.to_string())),
        }
    }
}

impl TokenIssuer for Authenticator {
    fn issue_session(&self, user_id: &UserId) -> Result<SessionTokens, UserError> {
        let pair = self
            .generate_token_pair(user_id)
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(SessionTokens {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }

    fn issue_access_token(&self, user_id: &UserId) -> Result<String, UserError> {
        self.generate_access_token(user_id)
            .map_err(|e| UserError::Token(e.to_string()))
    }

    fn verify_access_token(&self, token: &str) -> Result<UserId, UserError> {
        let claims = self.validate_access_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            UserError::InvalidAccessToken
        })?;

        UserId::from_string(&claims.sub).map_err(|_| UserError::InvalidAccessToken)
    }

    fn verify_refresh_token(&self, token: &str) -> Result<UserId, UserError> {
        let claims = self.validate_refresh_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Refresh token rejected");
            UserError::LoginRequired
        })?;

        UserId::from_string(&claims.sub).map_err(|_| UserError::LoginRequired)
    }
}

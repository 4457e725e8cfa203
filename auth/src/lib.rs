//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing (bcrypt)
//! - JWT token generation and validation
//! - Access/refresh token coordination
//!
//! Services define their own authentication traits and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::days(1));
//! let token = handler.issue("user123").unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Session Flow
//! ```
//! use auth::{Authenticator, PasswordHasher};
//!
//! let auth = Authenticator::new(
//!     b"access_secret_at_least_32_bytes_long!",
//!     b"refresh_secret_at_least_32_bytes_long",
//! )
//! .with_password_hasher(PasswordHasher::with_cost(4).unwrap());
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue both tokens
//! auth.verify_password("password123", &hash).unwrap();
//! let tokens = auth.generate_token_pair("user123").unwrap();
//!
//! // Refresh: trade the refresh token for a new access token
//! let claims = auth.validate_refresh_token(&tokens.refresh_token).unwrap();
//! let access_token = auth.generate_access_token(&claims.sub).unwrap();
//! assert!(auth.validate_access_token(&access_token).is_ok());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Registered JWT claims carried by session tokens.
///
/// The subject is the only identity carried in a token; everything else about
/// the user is loaded from storage when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID, unique per issued token
    pub jti: String,
}

impl Claims {
    /// Create claims for a subject expiring `lifetime` from now.
    ///
    /// # Arguments
    /// * `subject` - Unique user identifier
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, exp, iat and a fresh jti set
    pub fn for_subject(subject: impl ToString, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

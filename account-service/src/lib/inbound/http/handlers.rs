use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::ExpandedUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::user::errors::ErrorClass;
use crate::user::errors::UserError;

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh_token;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

// Malformed bodies keep the `{msg}` contract instead of axum's plain-text rejection.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { msg })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        let msg = err.to_string();
        match err.class() {
            ErrorClass::InvalidInput => ApiError::BadRequest(msg),
            ErrorClass::Conflict => ApiError::Conflict(msg),
            ErrorClass::Unauthorized => ApiError::Unauthorized(msg),
            ErrorClass::NotFound => ApiError::NotFound(msg),
            ErrorClass::Internal => {
                tracing::error!(error = %msg, "Request failed");
                ApiError::InternalServerError(msg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub msg: String,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub msg: String,
}

/// Follower/following entry: a bare id, or the populated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelatedUserData {
    Id(String),
    Summary(UserSummaryData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummaryData {
    pub id: String,
    pub avatar: String,
    pub username: String,
    pub fullname: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
}

impl From<&UserSummary> for UserSummaryData {
    fn from(summary: &UserSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            avatar: summary.avatar.clone(),
            username: summary.username.as_str().to_string(),
            fullname: summary.fullname.clone(),
            followers: summary.followers.iter().map(ToString::to_string).collect(),
            following: summary.following.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Public view of an account.
///
/// Fields are whitelisted from the entity; `password` is always empty so
/// clients relying on the field still find it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub avatar: String,
    pub followers: Vec<RelatedUserData>,
    pub following: Vec<RelatedUserData>,
    pub created_at: DateTime<Utc>,
}

impl UserData {
    fn with_relations(
        user: &User,
        followers: Vec<RelatedUserData>,
        following: Vec<RelatedUserData>,
    ) -> Self {
        Self {
            id: user.id.to_string(),
            fullname: user.fullname.clone(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            password: String::new(),
            gender: user.gender.clone(),
            avatar: user.avatar.clone(),
            followers,
            following,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        let ids = |related: &[UserId]| -> Vec<RelatedUserData> {
            related
                .iter()
                .map(|id| RelatedUserData::Id(id.to_string()))
                .collect()
        };

        Self::with_relations(user, ids(&user.followers), ids(&user.following))
    }
}

impl From<&ExpandedUser> for UserData {
    fn from(expanded: &ExpandedUser) -> Self {
        let summaries = |related: &[UserSummary]| -> Vec<RelatedUserData> {
            related
                .iter()
                .map(|s| RelatedUserData::Summary(s.into()))
                .collect()
        };

        Self::with_relations(
            &expanded.user,
            summaries(&expanded.followers),
            summaries(&expanded.following),
        )
    }
}

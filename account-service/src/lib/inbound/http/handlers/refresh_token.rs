use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::cookies;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn refresh_token<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let refresh_token = cookies::refresh_token(&jar).ok_or(UserError::LoginRequired)?;

    state
        .auth_service
        .refresh_access_token(&refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|renewed| {
            ApiSuccess::new(
                StatusCode::OK,
                RefreshTokenResponseData {
                    access_token: renewed.access_token,
                    user: (&renewed.user).into(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
    pub user: UserData,
}

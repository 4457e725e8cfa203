use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::DEFAULT_GENDER;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::cookies;
use crate::inbound::http::router::AppState;

pub async fn register<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    WithRejection(Json(body), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(CookieJar, ApiSuccess<SessionResponseData>), ApiError> {
    let registration = state
        .auth_service
        .register(body.into_command())
        .await
        .map_err(ApiError::from)?;

    let jar = cookies::with_refresh_token(
        jar,
        registration.tokens.refresh_token,
        state.refresh_cookie_max_age,
    );

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            SessionResponseData {
                msg: "Register Success!".to_string(),
                access_token: registration.tokens.access_token,
                user: (&registration.user).into(),
            },
        ),
    ))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    fullname: String,
    username: String,
    email: String,
    password: String,
    #[serde(default = "default_gender")]
    gender: String,
}

fn default_gender() -> String {
    DEFAULT_GENDER.to_string()
}

impl RegisterRequest {
    fn into_command(self) -> RegisterCommand {
        RegisterCommand {
            fullname: self.fullname,
            username: self.username,
            email: self.email,
            password: self.password,
            gender: self.gender,
        }
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub msg: String,
    pub access_token: String,
    pub user: UserData,
}

use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::cookies;

pub async fn logout(jar: CookieJar) -> (CookieJar, ApiSuccess<MessageData>) {
    (
        cookies::without_refresh_token(jar),
        ApiSuccess::new(
            StatusCode::OK,
            MessageData {
                msg: "Logged out!".to_string(),
            },
        ),
    )
}

use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use time::Duration;

/// Name of the cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshtoken";

/// The refresh token is only ever sent to the renewal endpoint.
pub const REFRESH_TOKEN_PATH: &str = "/api/refresh_token";

/// Add the HTTP-only refresh token cookie to the outgoing jar.
///
/// `max_age` should match the refresh token lifetime so the browser drops the
/// cookie when the token stops verifying.
pub fn with_refresh_token(
    jar: CookieJar,
    refresh_token: String,
    max_age: Duration,
) -> CookieJar {
    let cookie = Cookie::build((REFRESH_TOKEN_COOKIE, refresh_token))
        .http_only(true)
        .path(REFRESH_TOKEN_PATH)
        .max_age(max_age);

    jar.add(cookie)
}

/// Expire the refresh token cookie on the client.
///
/// A removal cookie is always emitted: the request hitting this endpoint never
/// carries the path-scoped cookie, so `CookieJar::remove` would be a no-op.
pub fn without_refresh_token(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::build((REFRESH_TOKEN_COOKIE, ""))
        .http_only(true)
        .path(REFRESH_TOKEN_PATH)
        .build();
    cookie.make_removal();

    jar.add(cookie)
}

/// Refresh token sent by the client, if any.
pub fn refresh_token(jar: &CookieJar) -> Option<String> {
    jar.get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

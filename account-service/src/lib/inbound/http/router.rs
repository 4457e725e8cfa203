use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::cookies::REFRESH_TOKEN_PATH;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::AuthServicePort;

pub struct AppState<S: AuthServicePort> {
    pub auth_service: Arc<S>,
    /// Max-Age of the refresh token cookie.
    pub refresh_cookie_max_age: time::Duration,
}

// Derived Clone would require `S: Clone`; only the Arc is cloned.
impl<S: AuthServicePort> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            refresh_cookie_max_age: self.refresh_cookie_max_age,
        }
    }
}

pub fn create_router<S: AuthServicePort>(
    auth_service: Arc<S>,
    refresh_cookie_max_age: time::Duration,
) -> Router {
    let state = AppState {
        auth_service,
        refresh_cookie_max_age,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register::<S>))
        .route("/api/login", post(login::<S>))
        .route("/api/logout", post(logout))
        .route(REFRESH_TOKEN_PATH, post(refresh_token::<S>));

    let protected_routes = Router::new()
        .route("/api/me", get(me::<S>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S>,
        ));

    // Headers are left out of the span: they carry bearer tokens and cookies.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header::AUTHORIZATION;
    use axum::http::StatusCode;
    use chrono::Utc;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::ExpandedUser;
    use crate::domain::user::models::LoginCommand;
    use crate::domain::user::models::LoginSession;
    use crate::domain::user::models::RegisterCommand;
    use crate::domain::user::models::Registration;
    use crate::domain::user::models::RenewedAccess;
    use crate::domain::user::models::SessionTokens;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;
    use crate::domain::user::models::DEFAULT_AVATAR;
    use crate::user::errors::UserError;

    mock! {
        pub Accounts {}

        #[async_trait]
        impl AuthServicePort for Accounts {
            async fn register(&self, command: RegisterCommand) -> Result<Registration, UserError>;
            async fn login(&self, command: LoginCommand) -> Result<LoginSession, UserError>;
            async fn refresh_access_token(&self, refresh_token: &str) -> Result<RenewedAccess, UserError>;
            async fn authenticate(&self, access_token: &str) -> Result<UserId, UserError>;
            async fn get_profile(&self, id: &UserId) -> Result<ExpandedUser, UserError>;
        }
    }

    fn profile(id: UserId) -> ExpandedUser {
        ExpandedUser {
            user: User {
                id,
                fullname: "Jane Doe".to_string(),
                username: Username::new("janedoe").unwrap(),
                email: EmailAddress::new("jane@x.com".to_string()).unwrap(),
                password_hash: "$2b$04$hash".to_string(),
                gender: "female".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
                followers: Vec::new(),
                following: Vec::new(),
                created_at: Utc::now(),
            },
            followers: Vec::new(),
            following: Vec::new(),
        }
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_me_requires_authorization_header() {
        let router = create_router(Arc::new(MockAccounts::new()), time::Duration::days(30));

        let response = router
            .oneshot(Request::get("/api/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["msg"], "Invalid Authentication.");
    }

    #[tokio::test]
    async fn test_me_returns_profile_for_valid_token() {
        let user_id = UserId::new();
        let mut accounts = MockAccounts::new();
        accounts
            .expect_authenticate()
            .withf(|token| token == "valid-token")
            .times(1)
            .returning(move |_| Ok(user_id));
        accounts
            .expect_get_profile()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(|id| Ok(profile(*id)));

        let response = create_router(Arc::new(accounts), time::Duration::days(30))
            .oneshot(
                Request::get("/api/me")
                    .header(AUTHORIZATION, "Bearer valid-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["id"], user_id.to_string());
        assert_eq!(body["user"]["password"], "");
    }

    #[tokio::test]
    async fn test_refresh_without_cookie_skips_service() {
        let router = create_router(Arc::new(MockAccounts::new()), time::Duration::days(30));

        let response = router
            .oneshot(
                Request::post(REFRESH_TOKEN_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["msg"], "Please login now.");
    }

    #[tokio::test]
    async fn test_refresh_cookie_max_age_follows_configuration() {
        let mut accounts = MockAccounts::new();
        accounts.expect_register().times(1).returning(|_| {
            Ok(Registration {
                user: profile(UserId::new()).user,
                tokens: SessionTokens {
                    access_token: "access".to_string(),
                    refresh_token: "refresh".to_string(),
                },
            })
        });

        let response = create_router(Arc::new(accounts), time::Duration::days(7))
            .oneshot(
                Request::post("/api/register")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"fullname":"Jane Doe","username":"janedoe","email":"jane@x.com","password":"secret1"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(axum::http::header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("refreshtoken=refresh"));
        assert!(cookie.contains("Max-Age=604800"));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let router = create_router(Arc::new(MockAccounts::new()), time::Duration::days(30));

        let response = router
            .oneshot(Request::get("/api/users").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

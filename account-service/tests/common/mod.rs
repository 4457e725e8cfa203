use std::sync::Arc;

use account_service::domain::user::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Duration;

pub const ACCESS_SECRET: &[u8] = b"test-access-secret-for-jwt-signing-at-least-32-bytes";
pub const REFRESH_SECRET: &[u8] = b"test-refresh-secret-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
    /// Client that keeps cookies between requests, like a browser
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryUserRepository::new());
        let authenticator = Arc::new(
            Authenticator::new(ACCESS_SECRET, REFRESH_SECRET)
                .with_password_hasher(PasswordHasher::with_cost(4).unwrap()),
        );

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
            Arc::clone(&authenticator),
        ));

        let refresh_cookie_max_age =
            time::Duration::seconds(authenticator.refresh_token_lifetime().num_seconds());
        let router = create_router(auth_service, refresh_cookie_max_age);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            repository,
            authenticator,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// POST from a cookie-less client with an explicit Cookie header
    pub fn post_with_cookie(&self, path: &str, cookie: &str) -> reqwest::RequestBuilder {
        reqwest::Client::new()
            .post(format!("{}{}", self.address, path))
            .header(reqwest::header::COOKIE, cookie)
    }

    /// POST /api/register through the cookie-keeping client
    pub async fn register(
        &self,
        fullname: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        self.post("/api/register")
            .json(&serde_json::json!({
                "fullname": fullname,
                "username": username,
                "email": email,
                "password": password,
                "gender": "female"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Refresh token signed with the right secret but already expired
    pub fn expired_refresh_token(&self, user_id: &str) -> String {
        JwtHandler::new(REFRESH_SECRET, Duration::days(-1))
            .issue(user_id)
            .expect("Failed to issue token")
    }
}

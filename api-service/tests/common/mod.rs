#![allow(dead_code)]

use std::sync::Arc;

use api_service::domain::authentication::service::AuthService;
use api_service::domain::authentication::service::AuthServiceConfig;
use api_service::inbound::http::router::create_router;
use api_service::outbound::repositories::InMemoryUserRepository;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use axum::Router;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const COOKIE_NAME: &str = "jwt";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryUserRepository>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

/// Build the router over a fresh in-memory store.
///
/// Uses the cheapest Argon2 parameters so tests stay fast.
pub fn build_router() -> (Router, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::new());

    let authenticator = Arc::new(Authenticator::from_parts(
        PasswordHasher::with_params(1024, 1, 1).expect("Invalid test hasher params"),
        JwtHandler::new(JWT_SECRET),
    ));

    let auth_service = Arc::new(
        AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&authenticator),
            AuthServiceConfig {
                token_ttl_hours: 24,
                max_concurrent_hashes: 4,
            },
        )
        .expect("Failed to create auth service"),
    );

    (
        create_router(auth_service, authenticator, COOKIE_NAME),
        repository,
    )
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let (router, repository) = build_router();

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make GET request with the token in the auth cookie
    pub fn get_with_cookie(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header(reqwest::header::COOKIE, format!("{}={}", COOKIE_NAME, token))
    }

    /// Register an account, asserting success
    pub async fn register(&self, email: &str, password: &str) {
        let response = self
            .post("/api/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]
            .as_str()
            .expect("Login response carries a token")
            .to_string()
    }
}

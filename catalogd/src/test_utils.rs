//! Test utilities for integration testing.

use crate::api::models::users::Role;
use crate::auth::password;
use crate::db::handlers::Users;
use crate::db::models::users::{UserCreateDBRequest, UserDBResponse};
use crate::{AppState, build_router};
use axum_test::TestServer;
use sqlx::PgPool;

pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery";

pub fn create_test_config() -> crate::config::Config {
    crate::config::Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_password: None,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    }
}

/// Spawn a test server backed by the given pool, with cookie persistence so
/// a login carries over to subsequent requests.
pub async fn spawn_test_server(pool: PgPool) -> TestServer {
    let state = AppState::builder().db(pool).config(create_test_config()).build();
    let router = build_router(state).expect("Failed to build router");

    TestServer::builder()
        .save_cookies()
        .build(router)
        .expect("Failed to create test server")
}

pub async fn create_admin_user(pool: &PgPool, email: &str, password: &str) -> UserDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut users_repo = Users::new(&mut conn);

    let password_hash = password::hash_string(password).expect("Failed to hash password");
    let user_create = UserCreateDBRequest {
        email: email.to_string(),
        password_hash,
        name: "Test Admin".to_string(),
        role: Role::Admin,
    };

    users_repo.create(&user_create).await.expect("Failed to create admin user")
}

/// Spawn a test server with an admin user already created and logged in.
/// The session cookie is saved on the server, so admin routes are usable
/// immediately.
pub async fn admin_server(pool: PgPool) -> TestServer {
    let server = spawn_test_server(pool.clone()).await;
    create_admin_user(&pool, TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD).await;

    server
        .post("/api/auth/login")
        .json(&serde_json::json!({"email": TEST_ADMIN_EMAIL, "password": TEST_ADMIN_PASSWORD}))
        .await
        .assert_status_ok();

    server
}

//! Session authentication endpoints for the admin console.

use axum::{Json, extract::State};

use crate::{
    AppState,
    api::models::users::{
        AuthResponse, AuthSuccessResponse, CurrentUser, LoginRequest, LoginResponse, LogoutResponse, UserResponse,
    },
    auth::{password, session},
    db::handlers::Users,
    errors::Error,
};

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<LoginResponse, Error> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut pool_conn);

    let user = user_repo
        .get_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        })?;

    // Verify password on a blocking thread to avoid blocking the async runtime
    let password = request.password.clone();
    let hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || password::verify_string(&password, &hash))
        .await
        .map_err(|e| Error::Internal {
            operation: format!("spawn password verification task: {e}"),
        })??;

    if !is_valid {
        return Err(Error::Unauthenticated {
            message: Some("Invalid email or password".to_string()),
        });
    }

    let user_response = UserResponse::from(user);
    let current_user = user_response.clone().into();
    let token = session::create_session_token(&current_user, &state.config)?;
    let max_age = state.config.auth.session.timeout.as_secs();
    let cookie = create_session_cookie(&token, max_age, &state.config);

    Ok(LoginResponse {
        auth_response: AuthResponse { user: user_response },
        cookie,
    })
}

/// Logout (clear session)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logout successful", body = AuthSuccessResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> Result<LogoutResponse, Error> {
    // Expired cookie clears the session client-side; the JWT itself simply
    // ages out.
    let cookie = create_session_cookie("", 0, &state.config);

    Ok(LogoutResponse {
        auth_response: AuthSuccessResponse {
            message: "Logout successful".to_string(),
        },
        cookie,
    })
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = CurrentUser),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn me(user: CurrentUser) -> Json<CurrentUser> {
    Json(user)
}

fn create_session_cookie(token: &str, max_age: u64, config: &crate::config::Config) -> String {
    let session_config = &config.auth.session;

    format!(
        "{}={}; Path=/; HttpOnly; Secure={}; SameSite={}; Max-Age={}",
        session_config.cookie_name, token, session_config.cookie_secure, session_config.cookie_same_site, max_age
    )
}

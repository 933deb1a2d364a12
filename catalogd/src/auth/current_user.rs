//! Extracting the authenticated user from requests.

use crate::{
    AppState,
    api::models::users::{CurrentUser, Role},
    auth::session,
    errors::{Error, Result},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, instrument, trace};

/// Extract user from the JWT session cookie if present and valid.
/// Returns:
/// - None: no session cookie present
/// - Some(Ok(user)): valid session found and verified
/// - Some(Err(error)): cookie header present but unreadable
#[instrument(skip(parts, config))]
fn try_session_cookie_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<CurrentUser>> {
    let cookie_header = parts.headers.get(axum::http::header::COOKIE)?;

    let cookie_str = match cookie_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid cookie header: {e}"),
            }));
        }
    };
    let cookie_name = &config.auth.session.cookie_name;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some((name, value)) = cookie.split_once('=') {
            if name == cookie_name {
                match session::verify_session_token(value, config) {
                    Ok(user) => return Some(Ok(user)),
                    Err(_) => {
                        // Expired or invalid token; treat the same as absent
                        continue;
                    }
                }
            }
        }
    }
    None
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_session_cookie_auth(parts, &state.config) {
            Some(Ok(user)) => {
                debug!("Found session authenticated user: {}", user.id);
                require_admin(user)
            }
            Some(Err(e)) => {
                trace!("Session authentication failed: {:?}", e);
                Err(Error::Unauthenticated { message: None })
            }
            None => {
                trace!("No authentication credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

/// Require the ADMIN role. Trivially satisfied today, but keeps the
/// 403-vs-401 distinction in one place if more roles are added.
pub fn require_admin(user: CurrentUser) -> Result<CurrentUser> {
    match user.role {
        Role::Admin => Ok(user),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, auth::session::create_session_token, test_utils::create_test_config};
    use axum::extract::FromRequestParts as _;
    use sqlx::PgPool;
    use uuid::Uuid;

    fn test_state(pool: PgPool) -> AppState {
        AppState::builder().db(pool).config(create_test_config()).build()
    }

    fn parts_with_cookie(cookie: &str) -> Parts {
        let request = axum::http::Request::builder()
            .uri("http://localhost/api/admin/products")
            .header(axum::http::header::COOKIE, cookie)
            .body(())
            .unwrap();
        request.into_parts().0
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_valid_session_cookie_extracts_user(pool: PgPool) {
        let state = test_state(pool);
        let user = CurrentUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            name: "Administrator".to_string(),
            role: Role::Admin,
        };
        let token = create_session_token(&user, &state.config).unwrap();
        let cookie_name = &state.config.auth.session.cookie_name;

        let mut parts = parts_with_cookie(&format!("{cookie_name}={token}"));
        let extracted = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted.id, user.id);
        assert_eq!(extracted.email, user.email);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_missing_cookie_is_unauthorized(pool: PgPool) {
        let state = test_state(pool);
        let request = axum::http::Request::builder()
            .uri("http://localhost/api/admin/products")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_garbage_token_is_unauthorized(pool: PgPool) {
        let state = test_state(pool);
        let cookie_name = state.config.auth.session.cookie_name.clone();

        let mut parts = parts_with_cookie(&format!("{cookie_name}=not.a.real.token"));
        let error = CurrentUser::from_request_parts(&mut parts, &state).await.unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::UNAUTHORIZED);
    }
}

//! # catalogd: Bilingual Product Catalog Backend
//!
//! `catalogd` is the content backend for an industrial heat-shrink products
//! manufacturer's corporate site. It serves a bilingual (Chinese/English)
//! catalog of products, categories, application scenarios, homepage banners,
//! and partners, along with a session-authenticated admin API for managing
//! that content.
//!
//! ## Overview
//!
//! The public site is a read-only consumer: it lists products (optionally
//! filtered by category, search text, or the featured/new flags), fetches a
//! single product by its code together with related products from the same
//! category, and renders categories, applications, banners, and partners in
//! their configured display order. Every textual field is stored as a zh/en
//! pair; responses carry both raw fields plus a resolved value for the
//! requested locale, falling back to the other language when a translation
//! is missing.
//!
//! The admin console authenticates with an email/password login that issues
//! a JWT session cookie. Authenticated admins get full CRUD over the
//! catalog entities plus a dashboard stats endpoint. Natural keys (product
//! code, category and application slugs) are checked before insert so that
//! collisions surface as friendly `409 Conflict` responses rather than raw
//! database errors.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL for persistence. The **API layer**
//! ([`api`]) holds the wire models and request handlers. The
//! **authentication layer** ([`auth`]) covers password hashing, JWT session
//! tokens, and the extractor that turns a session cookie into a
//! [`CurrentUser`](api::models::users::CurrentUser). The **database layer**
//! ([`db`]) uses the repository pattern: each entity has a repository that
//! owns its queries and maps database failures into a small error taxonomy.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use catalogd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = catalogd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     catalogd::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod locale;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::{
    api::models::users::Role,
    auth::password,
    db::handlers::Users,
    db::models::users::UserCreateDBRequest,
    openapi::ApiDoc,
};
use axum::{
    Router,
    http::{self, HeaderValue},
    routing::{get, post, put},
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, info, instrument, warn, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::UserId;

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the catalogd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the admin user on first startup, and updates the
/// password on subsequent startups if one is configured. Returns `None`
/// when the user does not exist and no password was configured to create
/// it with.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &PgPool) -> anyhow::Result<Option<UserId>> {
    let password_hash = match password {
        Some(pwd) => {
            let pwd = pwd.to_string();
            Some(
                tokio::task::spawn_blocking(move || password::hash_string(&pwd))
                    .await
                    .map_err(|e| anyhow::anyhow!("Password hashing task failed: {e}"))?
                    .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e}"))?,
            )
        }
        None => None,
    };

    let mut tx = db.begin().await?;
    let mut user_repo = Users::new(&mut tx);

    if let Some(existing_user) = user_repo.get_by_email(email).await? {
        if let Some(password_hash) = password_hash {
            sqlx::query("UPDATE users SET password_hash = $1 WHERE email = $2")
                .bind(password_hash)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        return Ok(Some(existing_user.id));
    }

    let Some(password_hash) = password_hash else {
        warn!("admin_password is not configured and no admin user exists; skipping admin user creation");
        return Ok(None);
    };

    let user_create = UserCreateDBRequest {
        email: email.to_string(),
        password_hash,
        name: "Administrator".to_string(),
        role: Role::Admin,
    };

    let created_user = user_repo.create(&user_create).await?;
    tx.commit().await?;

    info!("Created initial admin user {}", email);
    Ok(Some(created_user.id))
}

/// Connect to the database, run migrations, and seed the initial admin user.
async fn setup_database(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(&config.database_url).await?;
    migrator().run(&pool).await?;

    create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool).await?;

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.cors.allow_credentials)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::PUT,
            http::Method::DELETE,
        ])
        .allow_headers([http::header::CONTENT_TYPE]);

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// Three route groups share the same [`AppState`]: the public read-only
/// catalog under `/api/*`, session authentication under `/api/auth/*`, and
/// the admin CRUD surface under `/api/admin/*`. Admin handlers enforce
/// authentication themselves through the [`CurrentUser`] extractor.
///
/// [`CurrentUser`]: api::models::users::CurrentUser
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let public_routes = Router::new()
        .route("/api/products", get(api::handlers::products::list_products))
        .route("/api/products/{code}", get(api::handlers::products::get_product))
        .route("/api/categories", get(api::handlers::categories::list_categories))
        .route("/api/categories/{slug}", get(api::handlers::categories::get_category))
        .route("/api/applications", get(api::handlers::applications::list_applications))
        .route("/api/applications/{slug}", get(api::handlers::applications::get_application))
        .route("/api/banners", get(api::handlers::banners::list_banners))
        .route("/api/partners", get(api::handlers::partners::list_partners));

    let auth_routes = Router::new()
        .route("/api/auth/login", post(api::handlers::auth::login))
        .route("/api/auth/logout", post(api::handlers::auth::logout))
        .route("/api/auth/me", get(api::handlers::auth::me));

    let admin_routes = Router::new()
        .route(
            "/api/admin/products",
            get(api::handlers::products::admin_list_products).post(api::handlers::products::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            put(api::handlers::products::update_product).delete(api::handlers::products::delete_product),
        )
        .route("/api/admin/categories", post(api::handlers::categories::create_category))
        .route(
            "/api/admin/categories/{id}",
            put(api::handlers::categories::update_category).delete(api::handlers::categories::delete_category),
        )
        .route("/api/admin/applications", post(api::handlers::applications::create_application))
        .route(
            "/api/admin/applications/{id}",
            put(api::handlers::applications::update_application).delete(api::handlers::applications::delete_application),
        )
        .route(
            "/api/admin/banners",
            get(api::handlers::banners::admin_list_banners).post(api::handlers::banners::create_banner),
        )
        .route(
            "/api/admin/banners/{id}",
            put(api::handlers::banners::update_banner).delete(api::handlers::banners::delete_banner),
        )
        .route("/api/admin/partners", post(api::handlers::partners::create_partner))
        .route(
            "/api/admin/partners/{id}",
            put(api::handlers::partners::update_partner).delete(api::handlers::partners::delete_partner),
        )
        .route("/api/admin/stats", get(api::handlers::stats::get_stats));

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(public_routes)
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state.clone());

    let cors_layer = create_cors_layer(&state.config)?;

    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations, and seeds the initial admin user
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles
///    requests until the shutdown future resolves
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting catalog backend with configuration: {:#?}", config);

        let pool = setup_database(&config).await?;

        let app_state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(app_state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Catalog backend listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::create_initial_admin_user;
    use crate::db::handlers::Users;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_initial_admin_user_is_idempotent(pool: PgPool) {
        let first = create_initial_admin_user("admin@example.com", Some("hunter2"), &pool)
            .await
            .unwrap()
            .unwrap();
        let second = create_initial_admin_user("admin@example.com", Some("hunter2"), &pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first, second);

        let mut conn = pool.acquire().await.unwrap();
        let user = Users::new(&mut conn).get_by_email("admin@example.com").await.unwrap().unwrap();
        assert_eq!(user.id, first);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_no_password_and_no_user_skips_creation(pool: PgPool) {
        let result = create_initial_admin_user("admin@example.com", None, &pool).await.unwrap();
        assert!(result.is_none());

        let mut conn = pool.acquire().await.unwrap();
        assert!(Users::new(&mut conn).get_by_email("admin@example.com").await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_restart_updates_admin_password(pool: PgPool) {
        create_initial_admin_user("admin@example.com", Some("old password"), &pool)
            .await
            .unwrap();
        create_initial_admin_user("admin@example.com", Some("new password"), &pool)
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let user = Users::new(&mut conn).get_by_email("admin@example.com").await.unwrap().unwrap();
        assert!(crate::auth::password::verify_string("new password", &user.password_hash).unwrap());
        assert!(!crate::auth::password::verify_string("old password", &user.password_hash).unwrap());
    }
}

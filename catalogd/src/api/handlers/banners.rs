//! Banner endpoints. The public site only sees active banners; the admin
//! console manages the full set.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        banners::{BannerCreate, BannerResponse, BannerUpdate, ListBannersQuery},
        users::CurrentUser,
    },
    db::{
        handlers::{BannerFilter, Banners, Repository},
        models::banners::{BannerCreateDBRequest, BannerUpdateDBRequest},
    },
    errors::{Error, Result},
    types::BannerId,
};

#[utoipa::path(
    get,
    path = "/api/banners",
    tag = "banners",
    summary = "List active banners",
    params(ListBannersQuery),
    responses(
        (status = 200, description = "Active banners ordered for display", body = Vec<BannerResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_banners(
    State(state): State<AppState>,
    Query(query): Query<ListBannersQuery>,
) -> Result<Json<Vec<BannerResponse>>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Banners::new(&mut conn);
    let banners = repo.list(&BannerFilter { active_only: true }).await?;

    Ok(Json(
        banners.into_iter().map(|b| BannerResponse::from_db(b, locale)).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/banners",
    tag = "admin",
    summary = "List all banners",
    responses(
        (status = 200, description = "All banners including inactive", body = Vec<BannerResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn admin_list_banners(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<Vec<BannerResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Banners::new(&mut conn);
    let banners = repo.list(&BannerFilter::default()).await?;

    let locale = state.config.default_locale;
    Ok(Json(
        banners.into_iter().map(|b| BannerResponse::from_db(b, locale)).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/banners",
    tag = "admin",
    summary = "Create banner",
    request_body = BannerCreate,
    responses(
        (status = 201, description = "Banner created", body = BannerResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_banner(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<BannerCreate>,
) -> Result<(StatusCode, Json<BannerResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Banners::new(&mut conn);

    let created = repo.create(&BannerCreateDBRequest::from(request)).await?;

    let locale = state.config.default_locale;
    Ok((StatusCode::CREATED, Json(BannerResponse::from_db(created, locale))))
}

#[utoipa::path(
    put,
    path = "/api/admin/banners/{id}",
    tag = "admin",
    summary = "Update banner",
    request_body = BannerUpdate,
    params(("id" = uuid::Uuid, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Banner updated", body = BannerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Banner not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(banner_id = %id))]
pub async fn update_banner(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<BannerId>,
    Json(request): Json<BannerUpdate>,
) -> Result<Json<BannerResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Banners::new(&mut conn);

    let updated = repo.update(id, &BannerUpdateDBRequest::from(request)).await?;

    let locale = state.config.default_locale;
    Ok(Json(BannerResponse::from_db(updated, locale)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/banners/{id}",
    tag = "admin",
    summary = "Delete banner",
    params(("id" = uuid::Uuid, Path, description = "Banner ID")),
    responses(
        (status = 204, description = "Banner deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Banner not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(banner_id = %id))]
pub async fn delete_banner(State(state): State<AppState>, _user: CurrentUser, Path(id): Path<BannerId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Banners::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Banner".to_string(),
            key: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::admin_server;
    use serde_json::json;
    use sqlx::PgPool;

    fn banner_payload(title_en: &str, is_active: bool) -> serde_json::Value {
        json!({
            "titleZh": "专业热缩材料制造商",
            "titleEn": title_en,
            "image": "/images/banners/hero.jpg",
            "isActive": is_active,
            "order": 1
        })
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_public_list_hides_inactive(pool: PgPool) {
        let server = admin_server(pool).await;

        server
            .post("/api/admin/banners")
            .json(&banner_payload("Hero", true))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        server
            .post("/api/admin/banners")
            .json(&banner_payload("Draft", false))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let public: Vec<serde_json::Value> = server.get("/api/banners").await.json();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0]["titleEn"], "Hero");

        let admin: Vec<serde_json::Value> = server.get("/api/admin/banners").await.json();
        assert_eq!(admin.len(), 2);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_banner_is_404(pool: PgPool) {
        let server = admin_server(pool).await;

        let response = server
            .put(&format!("/api/admin/banners/{}", uuid::Uuid::new_v4()))
            .json(&banner_payload("Hero", true))
            .await;
        response.assert_status_not_found();
    }
}

//! Admin dashboard stats.

use axum::{Json, extract::State};
use sqlx::Acquire;

use crate::{
    AppState,
    api::models::{stats::StatsResponse, users::CurrentUser},
    db::handlers::{Banners, Categories, Products},
    errors::{Error, Result},
};

const RECENT_PRODUCTS_LIMIT: i64 = 5;

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    summary = "Dashboard counts and recent products",
    responses(
        (status = 200, description = "Dashboard stats", body = StatsResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_stats(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<StatsResponse>> {
    // One transaction so the counts describe a single snapshot
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let (products, recent_products) = {
        let mut repo = Products::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        (repo.count().await?, repo.recent(RECENT_PRODUCTS_LIMIT).await?)
    };
    let categories = {
        let mut repo = Categories::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.count().await?
    };
    let banners = {
        let mut repo = Banners::new(tx.acquire().await.map_err(|e| Error::Database(e.into()))?);
        repo.count().await?
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(StatsResponse {
        products,
        categories,
        banners,
        recent_products: recent_products.into_iter().map(Into::into).collect(),
    }))
}

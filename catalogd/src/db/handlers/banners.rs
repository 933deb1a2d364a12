//! Database repository for homepage banners.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::banners::{BannerCreateDBRequest, BannerDBResponse, BannerUpdateDBRequest},
    },
    types::{BannerId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for banner listings. The public site only ever sees active
/// banners; the admin console lists everything.
#[derive(Debug, Clone, Default)]
pub struct BannerFilter {
    pub active_only: bool,
}

pub struct Banners<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Banners<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM banners")
            .fetch_one(&mut *self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Banners<'c> {
    type CreateRequest = BannerCreateDBRequest;
    type UpdateRequest = BannerUpdateDBRequest;
    type Response = BannerDBResponse;
    type Id = BannerId;
    type Filter = BannerFilter;

    #[instrument(skip(self, request), fields(title = %request.title_en), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let banner = sqlx::query_as::<_, BannerDBResponse>(
            r#"
            INSERT INTO banners (id, title_zh, title_en, subtitle_zh, subtitle_en, image, link, sort_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.title_zh)
        .bind(&request.title_en)
        .bind(&request.subtitle_zh)
        .bind(&request.subtitle_en)
        .bind(&request.image)
        .bind(&request.link)
        .bind(request.sort_order)
        .bind(request.is_active)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(banner)
    }

    #[instrument(skip(self), fields(banner_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let banner = sqlx::query_as::<_, BannerDBResponse>("SELECT * FROM banners WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(banner)
    }

    #[instrument(skip(self, filter), fields(active_only = filter.active_only), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let sql = if filter.active_only {
            "SELECT * FROM banners WHERE is_active ORDER BY sort_order ASC"
        } else {
            "SELECT * FROM banners ORDER BY sort_order ASC"
        };
        let banners = sqlx::query_as::<_, BannerDBResponse>(sql)
            .fetch_all(&mut *self.db)
            .await?;
        Ok(banners)
    }

    #[instrument(skip(self), fields(banner_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(banner_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let banner = sqlx::query_as::<_, BannerDBResponse>(
            r#"
            UPDATE banners SET
                title_zh = $2, title_en = $3, subtitle_zh = $4, subtitle_en = $5,
                image = $6, link = $7, sort_order = $8, is_active = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.title_zh)
        .bind(&request.title_en)
        .bind(&request.subtitle_zh)
        .bind(&request.subtitle_en)
        .bind(&request.image)
        .bind(&request.link)
        .bind(request.sort_order)
        .bind(request.is_active)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(banner)
    }
}

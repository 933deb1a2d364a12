//! Database repository for application areas.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::applications::{
            ApplicationCreateDBRequest, ApplicationDBResponse, ApplicationUpdateDBRequest,
        },
    },
    types::{ApplicationId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter;

pub struct Applications<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Applications<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up an application area by its URL slug.
    #[instrument(skip(self), err)]
    pub async fn get_by_slug(&mut self, slug: &str) -> Result<Option<ApplicationDBResponse>> {
        let application =
            sqlx::query_as::<_, ApplicationDBResponse>("SELECT * FROM applications WHERE slug = $1")
                .bind(slug)
                .fetch_optional(&mut *self.db)
                .await?;
        Ok(application)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Applications<'c> {
    type CreateRequest = ApplicationCreateDBRequest;
    type UpdateRequest = ApplicationUpdateDBRequest;
    type Response = ApplicationDBResponse;
    type Id = ApplicationId;
    type Filter = ApplicationFilter;

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            INSERT INTO applications (id, name_zh, name_en, slug, desc_zh, desc_en, image, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name_zh)
        .bind(&request.name_en)
        .bind(&request.slug)
        .bind(&request.desc_zh)
        .bind(&request.desc_en)
        .bind(&request.image)
        .bind(request.sort_order)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(self), fields(application_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let application =
            sqlx::query_as::<_, ApplicationDBResponse>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;
        Ok(application)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let applications = sqlx::query_as::<_, ApplicationDBResponse>(
            "SELECT * FROM applications ORDER BY sort_order ASC",
        )
        .fetch_all(&mut *self.db)
        .await?;
        Ok(applications)
    }

    #[instrument(skip(self), fields(application_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(application_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let application = sqlx::query_as::<_, ApplicationDBResponse>(
            r#"
            UPDATE applications SET
                name_zh = $2, name_en = $3, slug = $4, desc_zh = $5, desc_en = $6,
                image = $7, sort_order = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name_zh)
        .bind(&request.name_en)
        .bind(&request.slug)
        .bind(&request.desc_zh)
        .bind(&request.desc_en)
        .bind(&request.image)
        .bind(request.sort_order)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(application)
    }
}

//! Database repository for partners.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::partners::{PartnerCreateDBRequest, PartnerDBResponse, PartnerUpdateDBRequest},
    },
    types::{PartnerId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct PartnerFilter;

pub struct Partners<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Partners<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Partners<'c> {
    type CreateRequest = PartnerCreateDBRequest;
    type UpdateRequest = PartnerUpdateDBRequest;
    type Response = PartnerDBResponse;
    type Id = PartnerId;
    type Filter = PartnerFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let partner = sqlx::query_as::<_, PartnerDBResponse>(
            r#"
            INSERT INTO partners (id, name, logo, website, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.logo)
        .bind(&request.website)
        .bind(request.sort_order)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(partner)
    }

    #[instrument(skip(self), fields(partner_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let partner = sqlx::query_as::<_, PartnerDBResponse>("SELECT * FROM partners WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(partner)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let partners =
            sqlx::query_as::<_, PartnerDBResponse>("SELECT * FROM partners ORDER BY sort_order ASC")
                .fetch_all(&mut *self.db)
                .await?;
        Ok(partners)
    }

    #[instrument(skip(self), fields(partner_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(partner_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let partner = sqlx::query_as::<_, PartnerDBResponse>(
            r#"
            UPDATE partners SET name = $2, logo = $3, website = $4, sort_order = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.logo)
        .bind(&request.website)
        .bind(request.sort_order)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(partner)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_crud_round_trip(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Partners::new(&mut conn);

        let created = repo
            .create(&PartnerCreateDBRequest {
                name: "State Grid".to_string(),
                logo: "/images/partners/state-grid.png".to_string(),
                website: Some("https://example.com".to_string()),
                sort_order: 1,
            })
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "State Grid");

        let updated = repo
            .update(
                created.id,
                &PartnerUpdateDBRequest {
                    name: "State Grid Corporation".to_string(),
                    logo: fetched.logo.clone(),
                    website: None,
                    sort_order: 2,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "State Grid Corporation");
        assert_eq!(updated.website, None);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_ordered_by_sort_order(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Partners::new(&mut conn);

        for (name, order) in [("Beta", 2), ("Alpha", 1), ("Gamma", 3)] {
            repo.create(&PartnerCreateDBRequest {
                name: name.to_string(),
                logo: format!("/images/partners/{}.png", name.to_lowercase()),
                website: None,
                sort_order: order,
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = repo
            .list(&PartnerFilter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }
}

//! Database repository for product categories.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::categories::{CategoryCreateDBRequest, CategoryDBResponse, CategoryUpdateDBRequest},
    },
    types::{CategoryId, abbrev_uuid},
};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Categories have no list filters; the whole set is small and always
/// returned ordered by `sort_order`.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter;

pub struct Categories<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Categories<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a category by its URL slug.
    #[instrument(skip(self), err)]
    pub async fn get_by_slug(&mut self, slug: &str) -> Result<Option<CategoryDBResponse>> {
        let category = sqlx::query_as::<_, CategoryDBResponse>("SELECT * FROM categories WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(category)
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Categories<'c> {
    type CreateRequest = CategoryCreateDBRequest;
    type UpdateRequest = CategoryUpdateDBRequest;
    type Response = CategoryDBResponse;
    type Id = CategoryId;
    type Filter = CategoryFilter;

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let category = sqlx::query_as::<_, CategoryDBResponse>(
            r#"
            INSERT INTO categories (id, name_zh, name_en, slug, desc_zh, desc_en, image, sort_order)
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

        Ok(category)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let category = sqlx::query_as::<_, CategoryDBResponse>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(category)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let categories = sqlx::query_as::<_, CategoryDBResponse>("SELECT * FROM categories ORDER BY sort_order ASC")
            .fetch_all(&mut *self.db)
            .await?;
        Ok(categories)
    }

    #[instrument(skip(self), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        // Products referencing this category's slug are deliberately left
        // alone; the dangling soft reference is an accepted state.
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(category_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let category = sqlx::query_as::<_, CategoryDBResponse>(
            r#"
            UPDATE categories SET
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

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use crate::db::handlers::products::{ProductFilter, Products};
    use crate::db::models::products::ProductCreateDBRequest;
    use sqlx::PgPool;

    fn sample_category(slug: &str, sort_order: i32) -> CategoryCreateDBRequest {
        CategoryCreateDBRequest {
            name_zh: "热缩管".to_string(),
            name_en: "Heat Shrink Tubing".to_string(),
            slug: slug.to_string(),
            desc_zh: None,
            desc_en: None,
            image: None,
            sort_order,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_by_slug(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Categories::new(&mut conn);

        let created = repo.create(&sample_category("heat-shrink-tubing", 1)).await.unwrap();
        let found = repo.get_by_slug("heat-shrink-tubing").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.name_en, "Heat Shrink Tubing");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_slug_is_a_unique_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Categories::new(&mut conn);

        repo.create(&sample_category("heat-shrink-tubing", 1)).await.unwrap();
        let err = repo.create(&sample_category("heat-shrink-tubing", 2)).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_ordered_by_sort_order(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Categories::new(&mut conn);

        repo.create(&sample_category("molded-parts", 5)).await.unwrap();
        repo.create(&sample_category("heat-shrink-tubing", 1)).await.unwrap();
        repo.create(&sample_category("cold-shrink-tubing", 2)).await.unwrap();

        let categories = repo.list(&CategoryFilter).await.unwrap();
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["heat-shrink-tubing", "cold-shrink-tubing", "molded-parts"]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_leaves_referencing_products_untouched(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut categories = Categories::new(&mut conn);
        let category = categories.create(&sample_category("heat-shrink-tubing", 1)).await.unwrap();

        let mut product_conn = pool.acquire().await.unwrap();
        let mut products = Products::new(&mut product_conn);
        products
            .create(&ProductCreateDBRequest {
                code: "HST-150".to_string(),
                name_zh: "热缩管".to_string(),
                name_en: "Heat Shrink Tubing".to_string(),
                desc_zh: String::new(),
                desc_en: String::new(),
                category: "heat-shrink-tubing".to_string(),
                image: None,
                specs: None,
                features: None,
                applications: None,
                certifications: None,
                is_new: false,
                is_featured: false,
                sort_order: 1,
            })
            .await
            .unwrap();

        // Deleting the category succeeds despite the referencing product
        assert!(categories.delete(category.id).await.unwrap());

        // The product's slug string is unchanged, now dangling
        let orphan = products.get_by_code("HST-150").await.unwrap().unwrap();
        assert_eq!(orphan.category, "heat-shrink-tubing");

        let filter = ProductFilter {
            category: Some("heat-shrink-tubing".to_string()),
            ..Default::default()
        };
        assert_eq!(products.list(&filter).await.unwrap().len(), 1);
    }
}

//! Database repository for products.

use crate::{
    db::{
        errors::{DbError, Result},
        handlers::repository::Repository,
        models::products::{ProductCreateDBRequest, ProductDBResponse, ProductUpdateDBRequest, RecentProductDBResponse},
    },
    types::{ProductId, abbrev_uuid},
};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing products. All predicates are optional and combined with
/// AND; results are always ordered ascending by `sort_order`.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact match on the category slug (soft reference)
    pub category: Option<String>,
    /// Case-insensitive substring match across name_zh, name_en and code
    pub search: Option<String>,
    /// Only featured products
    pub featured: bool,
    /// Only products flagged as new
    pub is_new: bool,
    /// Result-count cap
    pub limit: Option<i64>,
}

/// Escapes LIKE/ILIKE metacharacters so user-supplied search terms match
/// `%` and `_` literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

pub struct Products<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Products<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Look up a product by its public code (the natural key used in URLs).
    #[instrument(skip(self), err)]
    pub async fn get_by_code(&mut self, code: &str) -> Result<Option<ProductDBResponse>> {
        let product = sqlx::query_as::<_, ProductDBResponse>("SELECT * FROM products WHERE code = $1")
            .bind(code)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self), err)]
    pub async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *self.db)
            .await?;
        Ok(count)
    }

    /// The `n` most recently created products, newest first.
    #[instrument(skip(self), err)]
    pub async fn recent(&mut self, n: i64) -> Result<Vec<RecentProductDBResponse>> {
        let products = sqlx::query_as::<_, RecentProductDBResponse>(
            "SELECT id, code, name_zh, name_en, created_at FROM products ORDER BY created_at DESC LIMIT $1",
        )
        .bind(n)
        .fetch_all(&mut *self.db)
        .await?;
        Ok(products)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Products<'c> {
    type CreateRequest = ProductCreateDBRequest;
    type UpdateRequest = ProductUpdateDBRequest;
    type Response = ProductDBResponse;
    type Id = ProductId;
    type Filter = ProductFilter;

    #[instrument(skip(self, request), fields(code = %request.code), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, ProductDBResponse>(
            r#"
            INSERT INTO products (id, code, name_zh, name_en, desc_zh, desc_en, category, image,
                                  specs, features, applications, certifications, is_new, is_featured, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.code)
        .bind(&request.name_zh)
        .bind(&request.name_en)
        .bind(&request.desc_zh)
        .bind(&request.desc_en)
        .bind(&request.category)
        .bind(&request.image)
        .bind(&request.specs)
        .bind(&request.features)
        .bind(&request.applications)
        .bind(&request.certifications)
        .bind(request.is_new)
        .bind(request.is_featured)
        .bind(request.sort_order)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let product = sqlx::query_as::<_, ProductDBResponse>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM products WHERE TRUE");

        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category);
        }
        if filter.featured {
            query.push(" AND is_featured");
        }
        if filter.is_new {
            query.push(" AND is_new");
        }
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", escape_like(search));
            query.push(" AND (name_zh ILIKE ").push_bind(pattern.clone());
            query.push(" ESCAPE '\\' OR name_en ILIKE ").push_bind(pattern.clone());
            query.push(" ESCAPE '\\' OR code ILIKE ").push_bind(pattern);
            query.push(" ESCAPE '\\')");
        }

        query.push(" ORDER BY sort_order ASC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let products = query.build_query_as::<ProductDBResponse>().fetch_all(&mut *self.db).await?;
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(product_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let product = sqlx::query_as::<_, ProductDBResponse>(
            r#"
            UPDATE products SET
                code = $2, name_zh = $3, name_en = $4, desc_zh = $5, desc_en = $6,
                category = $7, image = $8, specs = $9, features = $10, applications = $11,
                certifications = $12, is_new = $13, is_featured = $14, sort_order = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.code)
        .bind(&request.name_zh)
        .bind(&request.name_en)
        .bind(&request.desc_zh)
        .bind(&request.desc_en)
        .bind(&request.category)
        .bind(&request.image)
        .bind(&request.specs)
        .bind(&request.features)
        .bind(&request.applications)
        .bind(&request.certifications)
        .bind(request.is_new)
        .bind(request.is_featured)
        .bind(request.sort_order)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::super::repository::Repository;
    use super::*;
    use sqlx::PgPool;

    fn sample_product(code: &str, category: &str, sort_order: i32) -> ProductCreateDBRequest {
        ProductCreateDBRequest {
            code: code.to_string(),
            name_zh: "热缩管".to_string(),
            name_en: "Heat Shrink Tubing".to_string(),
            desc_zh: String::new(),
            desc_en: String::new(),
            category: category.to_string(),
            image: None,
            specs: None,
            features: None,
            applications: None,
            certifications: None,
            is_new: false,
            is_featured: false,
            sort_order,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_by_code_round_trip(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let created = repo.create(&sample_product("HST-150", "heat-shrink-tubing", 1)).await.unwrap();
        let found = repo.get_by_code("HST-150").await.unwrap().expect("product should exist");

        assert_eq!(found.id, created.id);
        assert_eq!(found.code, "HST-150");
        assert_eq!(found.name_zh, "热缩管");
        assert_eq!(found.name_en, "Heat Shrink Tubing");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_code_is_a_unique_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let original = repo.create(&sample_product("HST-150", "heat-shrink-tubing", 1)).await.unwrap();

        let mut dup = sample_product("HST-150", "cold-shrink-tubing", 9);
        dup.name_en = "Impostor".to_string();
        let err = repo.create(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));

        // The existing record is unmodified
        let found = repo.get_by_code("HST-150").await.unwrap().unwrap();
        assert_eq!(found.id, original.id);
        assert_eq!(found.name_en, "Heat Shrink Tubing");
        assert_eq!(found.category, "heat-shrink-tubing");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_category_filter_only_returns_matching_products(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        repo.create(&sample_product("HST-150", "heat-shrink-tubing", 1)).await.unwrap();
        repo.create(&sample_product("CST-20", "cold-shrink-tubing", 2)).await.unwrap();
        repo.create(&sample_product("HST-300", "heat-shrink-tubing", 3)).await.unwrap();

        let filter = ProductFilter {
            category: Some("heat-shrink-tubing".to_string()),
            ..Default::default()
        };
        let products = repo.list(&filter).await.unwrap();

        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.category == "heat-shrink-tubing"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_is_case_insensitive_across_names_and_code(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        repo.create(&sample_product("HST-150", "heat-shrink-tubing", 1)).await.unwrap();
        let mut other = sample_product("CST-20", "cold-shrink-tubing", 2);
        other.name_zh = "冷缩管".to_string();
        other.name_en = "Cold Shrink Tubing".to_string();
        repo.create(&other).await.unwrap();

        // lowercase query matches the uppercase code
        let filter = ProductFilter {
            search: Some("hst".to_string()),
            ..Default::default()
        };
        let by_code = repo.list(&filter).await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "HST-150");

        // substring of the English name
        let filter = ProductFilter {
            search: Some("cold shrink".to_string()),
            ..Default::default()
        };
        let by_name = repo.list(&filter).await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].code, "CST-20");

        // Chinese name substring
        let filter = ProductFilter {
            search: Some("冷缩".to_string()),
            ..Default::default()
        };
        let by_zh = repo.list(&filter).await.unwrap();
        assert_eq!(by_zh.len(), 1);
        assert_eq!(by_zh[0].code, "CST-20");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_search_matches_like_metacharacters_literally(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let mut discounted = sample_product("SALE-1", "c", 1);
        discounted.name_en = "Tubing 100% flame retardant".to_string();
        repo.create(&discounted).await.unwrap();
        let mut underscored = sample_product("HST_150", "c", 2);
        underscored.name_en = "Plain tubing".to_string();
        repo.create(&underscored).await.unwrap();

        // "%" must only match a literal percent sign, not act as a wildcard
        let filter = ProductFilter {
            search: Some("100%".to_string()),
            ..Default::default()
        };
        let by_percent = repo.list(&filter).await.unwrap();
        assert_eq!(by_percent.len(), 1);
        assert_eq!(by_percent[0].code, "SALE-1");

        // "_" must not match arbitrary single characters like the "-" in SALE-1
        let filter = ProductFilter {
            search: Some("HST_".to_string()),
            ..Default::default()
        };
        let by_underscore = repo.list(&filter).await.unwrap();
        assert_eq!(by_underscore.len(), 1);
        assert_eq!(by_underscore[0].code, "HST_150");

        let filter = ProductFilter {
            search: Some("200%".to_string()),
            ..Default::default()
        };
        assert!(repo.list(&filter).await.unwrap().is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_is_ordered_by_sort_order_and_capped(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        // Insert out of order; a later insert with sort_order between two
        // existing rows must land between them in subsequent lists.
        repo.create(&sample_product("P-3", "c", 3)).await.unwrap();
        repo.create(&sample_product("P-1", "c", 1)).await.unwrap();
        repo.create(&sample_product("P-2", "c", 2)).await.unwrap();

        let products = repo.list(&ProductFilter::default()).await.unwrap();
        let codes: Vec<&str> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["P-1", "P-2", "P-3"]);

        let filter = ProductFilter {
            limit: Some(2),
            ..Default::default()
        };
        let capped = repo.list(&filter).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].code, "P-1");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_featured_and_new_flags(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let mut featured = sample_product("F-1", "c", 1);
        featured.is_featured = true;
        repo.create(&featured).await.unwrap();

        let mut brand_new = sample_product("N-1", "c", 2);
        brand_new.is_new = true;
        repo.create(&brand_new).await.unwrap();

        repo.create(&sample_product("B-1", "c", 3)).await.unwrap();

        let filter = ProductFilter {
            featured: true,
            ..Default::default()
        };
        let featured_only = repo.list(&filter).await.unwrap();
        assert_eq!(featured_only.len(), 1);
        assert_eq!(featured_only[0].code, "F-1");

        let filter = ProductFilter {
            is_new: true,
            ..Default::default()
        };
        let new_only = repo.list(&filter).await.unwrap();
        assert_eq!(new_only.len(), 1);
        assert_eq!(new_only[0].code, "N-1");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_overwrites_all_fields(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let created = repo.create(&sample_product("HST-150", "heat-shrink-tubing", 1)).await.unwrap();

        let update = ProductUpdateDBRequest {
            code: "HST-150".to_string(),
            name_zh: "双壁热缩管".to_string(),
            name_en: "Dual Wall Tubing".to_string(),
            desc_zh: "带胶".to_string(),
            desc_en: "Adhesive lined".to_string(),
            category: "heat-shrink-tubing".to_string(),
            image: Some("/images/products/hst-150.jpg".to_string()),
            specs: Some("2:1\n3:1".to_string()),
            features: None,
            applications: None,
            certifications: Some("UL,RoHS".to_string()),
            is_new: true,
            is_featured: true,
            sort_order: 7,
        };
        let updated = repo.update(created.id, &update).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name_en, "Dual Wall Tubing");
        assert_eq!(updated.sort_order, 7);
        assert!(updated.is_featured);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_product_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        let update = ProductUpdateDBRequest {
            code: "GHOST".to_string(),
            name_zh: String::new(),
            name_en: String::new(),
            desc_zh: String::new(),
            desc_en: String::new(),
            category: "c".to_string(),
            image: None,
            specs: None,
            features: None,
            applications: None,
            certifications: None,
            is_new: false,
            is_featured: false,
            sort_order: 0,
        };
        let err = repo.update(Uuid::new_v4(), &update).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_recent_returns_newest_first(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Products::new(&mut conn);

        for i in 0..7 {
            repo.create(&sample_product(&format!("P-{i}"), "c", i)).await.unwrap();
        }

        let recent = repo.recent(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        for pair in recent.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
        assert_eq!(repo.count().await.unwrap(), 7);
    }
}

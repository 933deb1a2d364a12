//! Product endpoints: public catalog reads and admin CRUD.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        products::{
            GetProductQuery, ListProductsQuery, ProductCreate, ProductDetailResponse, ProductResponse, ProductUpdate,
        },
        users::CurrentUser,
    },
    db::{
        handlers::{ProductFilter, Products, Repository},
        models::products::{ProductCreateDBRequest, ProductUpdateDBRequest},
    },
    errors::{Error, Result},
    types::ProductId,
};

const RELATED_PRODUCTS_CAP: usize = 4;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    summary = "List products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Filtered product list", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<Vec<ProductResponse>>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);
    let filter = ProductFilter {
        category: query.category,
        search: query.search,
        featured: query.featured.unwrap_or(false),
        is_new: query.new.unwrap_or(false),
        limit: query.limit,
    };

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);
    let products = repo.list(&filter).await?;

    Ok(Json(
        products.into_iter().map(|p| ProductResponse::from_db(p, locale)).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/products/{code}",
    tag = "products",
    summary = "Get product by code",
    params(
        ("code" = String, Path, description = "Product code"),
        GetProductQuery,
    ),
    responses(
        (status = 200, description = "Product detail with related products", body = ProductDetailResponse),
        (status = 404, description = "Product not found"),
    )
)]
#[tracing::instrument(skip_all, fields(code = %code))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<GetProductQuery>,
) -> Result<Json<ProductDetailResponse>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    let product = repo.get_by_code(&code).await?.ok_or_else(|| Error::NotFound {
        resource: "Product".to_string(),
        key: code.clone(),
    })?;

    // Other products in the same category, capped; the lookup itself never
    // comes back as a related product
    let siblings = repo
        .list(&ProductFilter {
            category: Some(product.category.clone()),
            ..Default::default()
        })
        .await?;
    let related_products = siblings
        .into_iter()
        .filter(|p| p.id != product.id)
        .take(RELATED_PRODUCTS_CAP)
        .map(|p| ProductResponse::from_db(p, locale))
        .collect();

    Ok(Json(ProductDetailResponse {
        product: ProductResponse::from_db(product, locale),
        related_products,
    }))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "admin",
    summary = "List all products for the admin console",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn admin_list_products(State(state): State<AppState>, _user: CurrentUser) -> Result<Json<Vec<ProductResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);
    let products = repo.list(&ProductFilter::default()).await?;

    let locale = state.config.default_locale;
    Ok(Json(
        products.into_iter().map(|p| ProductResponse::from_db(p, locale)).collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "admin",
    summary = "Create product",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A product with this code already exists"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(code = %request.code))]
pub async fn create_product(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<ProductCreate>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut tx);

    // Friendly pre-check; the unique index still backstops concurrent creates
    if repo.get_by_code(&request.code).await?.is_some() {
        return Err(Error::Conflict {
            message: "A product with this code already exists".to_string(),
        });
    }

    let created = repo.create(&ProductCreateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok((StatusCode::CREATED, Json(ProductResponse::from_db(created, locale))))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = "admin",
    summary = "Update product",
    request_body = ProductUpdate,
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Another product already uses this code"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn update_product(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductUpdate>,
) -> Result<Json<ProductResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut tx);

    // Allow keeping the same code, refuse stealing another product's
    if let Some(existing) = repo.get_by_code(&request.code).await? {
        if existing.id != id {
            return Err(Error::Conflict {
                message: "A product with this code already exists".to_string(),
            });
        }
    }

    let updated = repo.update(id, &ProductUpdateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok(Json(ProductResponse::from_db(updated, locale)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "admin",
    summary = "Delete product",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn delete_product(State(state): State<AppState>, _user: CurrentUser, Path(id): Path<ProductId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Products::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Product".to_string(),
            key: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{admin_server, spawn_test_server};
    use serde_json::json;
    use sqlx::PgPool;

    fn product_payload(code: &str) -> serde_json::Value {
        json!({
            "code": code,
            "nameZh": "热缩管",
            "nameEn": "Heat Shrink Tubing",
            "descZh": "环保阻燃",
            "descEn": "Flame retardant",
            "category": "heat-shrink-tubing",
            "isFeatured": true,
            "order": 1
        })
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_admin_routes_reject_unauthenticated(pool: PgPool) {
        let server = spawn_test_server(pool).await;

        server.get("/api/admin/products").await.assert_status_unauthorized();
        server
            .post("/api/admin/products")
            .json(&product_payload("HST-150"))
            .await
            .assert_status_unauthorized();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_then_public_lookup(pool: PgPool) {
        let server = admin_server(pool).await;

        let created = server.post("/api/admin/products").json(&product_payload("HST-150")).await;
        created.assert_status(axum::http::StatusCode::CREATED);

        let response = server.get("/api/products/HST-150").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["product"]["code"], "HST-150");
        // Default locale is Chinese
        assert_eq!(body["product"]["name"], "热缩管");
        assert_eq!(body["relatedProducts"].as_array().unwrap().len(), 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_lang_param_resolves_english(pool: PgPool) {
        let server = admin_server(pool).await;
        server.post("/api/admin/products").json(&product_payload("HST-150")).await;

        let response = server.get("/api/products/HST-150").add_query_param("lang", "en").await;
        let body: serde_json::Value = response.json();
        assert_eq!(body["product"]["name"], "Heat Shrink Tubing");
        assert_eq!(body["product"]["description"], "Flame retardant");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_code_is_409(pool: PgPool) {
        let server = admin_server(pool).await;

        server
            .post("/api/admin/products")
            .json(&product_payload("HST-150"))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        let response = server.post("/api/admin/products").json(&product_payload("HST-150")).await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(body["message"], "A product with this code already exists");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_cannot_steal_another_code(pool: PgPool) {
        let server = admin_server(pool).await;

        server.post("/api/admin/products").json(&product_payload("HST-150")).await;
        let second: serde_json::Value = server
            .post("/api/admin/products")
            .json(&product_payload("CST-200"))
            .await
            .json();

        let mut payload = product_payload("HST-150");
        payload["nameEn"] = json!("Renamed");
        let response = server
            .put(&format!("/api/admin/products/{}", second["id"].as_str().unwrap()))
            .json(&payload)
            .await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_keeping_own_code_is_ok(pool: PgPool) {
        let server = admin_server(pool).await;

        let created: serde_json::Value = server
            .post("/api/admin/products")
            .json(&product_payload("HST-150"))
            .await
            .json();

        let mut payload = product_payload("HST-150");
        payload["nameEn"] = json!("Renamed");
        let response = server
            .put(&format!("/api/admin/products/{}", created["id"].as_str().unwrap()))
            .json(&payload)
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["nameEn"], "Renamed");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_related_products_same_category_capped(pool: PgPool) {
        let server = admin_server(pool).await;

        for i in 0..6 {
            let mut payload = product_payload(&format!("HST-{i}"));
            payload["order"] = json!(i);
            server
                .post("/api/admin/products")
                .json(&payload)
                .await
                .assert_status(axum::http::StatusCode::CREATED);
        }
        let mut other = product_payload("CST-1");
        other["category"] = json!("cold-shrink");
        server.post("/api/admin/products").json(&other).await;

        let body: serde_json::Value = server.get("/api/products/HST-0").await.json();
        let related = body["relatedProducts"].as_array().unwrap();
        assert_eq!(related.len(), 4);
        for item in related {
            assert_ne!(item["code"], "HST-0");
            assert_eq!(item["category"], "heat-shrink-tubing");
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_then_404(pool: PgPool) {
        let server = admin_server(pool).await;

        let created: serde_json::Value = server
            .post("/api/admin/products")
            .json(&product_payload("HST-150"))
            .await
            .json();
        let id = created["id"].as_str().unwrap();

        server
            .delete(&format!("/api/admin/products/{id}"))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);
        server
            .delete(&format!("/api/admin/products/{id}"))
            .await
            .assert_status_not_found();
        server.get("/api/products/HST-150").await.assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_public_list_filters(pool: PgPool) {
        let server = admin_server(pool).await;

        server.post("/api/admin/products").json(&product_payload("HST-150")).await;
        let mut plain = product_payload("CST-200");
        plain["isFeatured"] = json!(false);
        plain["category"] = json!("cold-shrink");
        server.post("/api/admin/products").json(&plain).await;

        let featured: Vec<serde_json::Value> = server
            .get("/api/products")
            .add_query_param("featured", "true")
            .await
            .json();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0]["code"], "HST-150");

        let by_category: Vec<serde_json::Value> = server
            .get("/api/products")
            .add_query_param("category", "cold-shrink")
            .await
            .json();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0]["code"], "CST-200");
    }
}

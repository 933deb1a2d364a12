//! Category endpoints: public reads and admin CRUD.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        categories::{CategoryCreate, CategoryResponse, CategoryUpdate, ListCategoriesQuery},
        users::CurrentUser,
    },
    db::{
        handlers::{Categories, CategoryFilter, Repository},
        models::categories::{CategoryCreateDBRequest, CategoryUpdateDBRequest},
    },
    errors::{Error, Result},
    types::CategoryId,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    summary = "List categories",
    params(ListCategoriesQuery),
    responses(
        (status = 200, description = "Categories ordered for display", body = Vec<CategoryResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);
    let categories = repo.list(&CategoryFilter).await?;

    Ok(Json(
        categories.into_iter().map(|c| CategoryResponse::from_db(c, locale)).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    tag = "categories",
    summary = "Get category by slug",
    params(
        ("slug" = String, Path, description = "Category slug"),
        ListCategoriesQuery,
    ),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<CategoryResponse>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let category = repo.get_by_slug(&slug).await?.ok_or_else(|| Error::NotFound {
        resource: "Category".to_string(),
        key: slug.clone(),
    })?;

    Ok(Json(CategoryResponse::from_db(category, locale)))
}

#[utoipa::path(
    post,
    path = "/api/admin/categories",
    tag = "admin",
    summary = "Create category",
    request_body = CategoryCreate,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A category with this slug already exists"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(slug = %request.slug))]
pub async fn create_category(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut tx);

    if repo.get_by_slug(&request.slug).await?.is_some() {
        return Err(Error::Conflict {
            message: "A category with this slug already exists".to_string(),
        });
    }

    let created = repo.create(&CategoryCreateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from_db(created, locale))))
}

#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    tag = "admin",
    summary = "Update category",
    request_body = CategoryUpdate,
    params(("id" = uuid::Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Another category already uses this slug"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(category_id = %id))]
pub async fn update_category(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryUpdate>,
) -> Result<Json<CategoryResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut tx);

    if let Some(existing) = repo.get_by_slug(&request.slug).await? {
        if existing.id != id {
            return Err(Error::Conflict {
                message: "A category with this slug already exists".to_string(),
            });
        }
    }

    let updated = repo.update(id, &CategoryUpdateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok(Json(CategoryResponse::from_db(updated, locale)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    tag = "admin",
    summary = "Delete category",
    params(("id" = uuid::Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted; product references are left dangling"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(category_id = %id))]
pub async fn delete_category(State(state): State<AppState>, _user: CurrentUser, Path(id): Path<CategoryId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Category".to_string(),
            key: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

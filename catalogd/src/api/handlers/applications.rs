//! Application-area endpoints: public reads and admin CRUD.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        applications::{ApplicationCreate, ApplicationResponse, ApplicationUpdate, ListApplicationsQuery},
        users::CurrentUser,
    },
    db::{
        handlers::{ApplicationFilter, Applications, Repository},
        models::applications::{ApplicationCreateDBRequest, ApplicationUpdateDBRequest},
    },
    errors::{Error, Result},
    types::ApplicationId,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    tag = "applications",
    summary = "List application areas",
    params(ListApplicationsQuery),
    responses(
        (status = 200, description = "Application areas ordered for display", body = Vec<ApplicationResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<Vec<ApplicationResponse>>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);
    let applications = repo.list(&ApplicationFilter).await?;

    Ok(Json(
        applications
            .into_iter()
            .map(|a| ApplicationResponse::from_db(a, locale))
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications/{slug}",
    tag = "applications",
    summary = "Get application area by slug",
    params(
        ("slug" = String, Path, description = "Application slug"),
        ListApplicationsQuery,
    ),
    responses(
        (status = 200, description = "Application area", body = ApplicationResponse),
        (status = 404, description = "Application not found"),
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn get_application(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<ApplicationResponse>> {
    let locale = query.lang.unwrap_or(state.config.default_locale);

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    let application = repo.get_by_slug(&slug).await?.ok_or_else(|| Error::NotFound {
        resource: "Application".to_string(),
        key: slug.clone(),
    })?;

    Ok(Json(ApplicationResponse::from_db(application, locale)))
}

#[utoipa::path(
    post,
    path = "/api/admin/applications",
    tag = "admin",
    summary = "Create application area",
    request_body = ApplicationCreate,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "An application with this slug already exists"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(slug = %request.slug))]
pub async fn create_application(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut tx);

    if repo.get_by_slug(&request.slug).await?.is_some() {
        return Err(Error::Conflict {
            message: "An application with this slug already exists".to_string(),
        });
    }

    let created = repo.create(&ApplicationCreateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from_db(created, locale))))
}

#[utoipa::path(
    put,
    path = "/api/admin/applications/{id}",
    tag = "admin",
    summary = "Update application area",
    request_body = ApplicationUpdate,
    params(("id" = uuid::Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application updated", body = ApplicationResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Another application already uses this slug"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(application_id = %id))]
pub async fn update_application(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<ApplicationId>,
    Json(request): Json<ApplicationUpdate>,
) -> Result<Json<ApplicationResponse>> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut tx);

    if let Some(existing) = repo.get_by_slug(&request.slug).await? {
        if existing.id != id {
            return Err(Error::Conflict {
                message: "An application with this slug already exists".to_string(),
            });
        }
    }

    let updated = repo.update(id, &ApplicationUpdateDBRequest::from(request)).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    let locale = state.config.default_locale;
    Ok(Json(ApplicationResponse::from_db(updated, locale)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/applications/{id}",
    tag = "admin",
    summary = "Delete application area",
    params(("id" = uuid::Uuid, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Application not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(application_id = %id))]
pub async fn delete_application(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<ApplicationId>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Applications::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Application".to_string(),
            key: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

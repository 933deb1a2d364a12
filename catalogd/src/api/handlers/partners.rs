//! Partner endpoints: public list and admin CRUD.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::models::{
        partners::{PartnerCreate, PartnerResponse, PartnerUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{PartnerFilter, Partners, Repository},
        models::partners::{PartnerCreateDBRequest, PartnerUpdateDBRequest},
    },
    errors::{Error, Result},
    types::PartnerId,
};

#[utoipa::path(
    get,
    path = "/api/partners",
    tag = "partners",
    summary = "List partners",
    responses(
        (status = 200, description = "Partners ordered for display", body = Vec<PartnerResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_partners(State(state): State<AppState>) -> Result<Json<Vec<PartnerResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Partners::new(&mut conn);
    let partners = repo.list(&PartnerFilter).await?;

    Ok(Json(partners.into_iter().map(PartnerResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/admin/partners",
    tag = "admin",
    summary = "Create partner",
    request_body = PartnerCreate,
    responses(
        (status = 201, description = "Partner created", body = PartnerResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_partner(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(request): Json<PartnerCreate>,
) -> Result<(StatusCode, Json<PartnerResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Partners::new(&mut conn);

    let created = repo.create(&PartnerCreateDBRequest::from(request)).await?;

    Ok((StatusCode::CREATED, Json(PartnerResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/admin/partners/{id}",
    tag = "admin",
    summary = "Update partner",
    request_body = PartnerUpdate,
    params(("id" = uuid::Uuid, Path, description = "Partner ID")),
    responses(
        (status = 200, description = "Partner updated", body = PartnerResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Partner not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(partner_id = %id))]
pub async fn update_partner(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<PartnerId>,
    Json(request): Json<PartnerUpdate>,
) -> Result<Json<PartnerResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Partners::new(&mut conn);

    let updated = repo.update(id, &PartnerUpdateDBRequest::from(request)).await?;

    Ok(Json(PartnerResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/partners/{id}",
    tag = "admin",
    summary = "Delete partner",
    params(("id" = uuid::Uuid, Path, description = "Partner ID")),
    responses(
        (status = 204, description = "Partner deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Partner not found"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(partner_id = %id))]
pub async fn delete_partner(State(state): State<AppState>, _user: CurrentUser, Path(id): Path<PartnerId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Partners::new(&mut conn);

    if !repo.delete(id).await? {
        return Err(Error::NotFound {
            resource: "Partner".to_string(),
            key: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

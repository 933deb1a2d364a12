//! API models for partners.

use crate::{db::models::partners::PartnerDBResponse, types::PartnerId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: PartnerId,
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub order: i32,
}

impl From<PartnerDBResponse> for PartnerResponse {
    fn from(db: PartnerDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            logo: db.logo,
            website: db.website,
            order: db.sort_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerCreate {
    pub name: String,
    pub logo: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUpdate {
    pub name: String,
    pub logo: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub order: i32,
}

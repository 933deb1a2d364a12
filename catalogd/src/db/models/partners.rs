//! Database models for partners.

use crate::api::models::partners::{PartnerCreate, PartnerUpdate};
use crate::types::PartnerId;
use sqlx::FromRow;

/// Database request for creating a new partner
#[derive(Debug, Clone)]
pub struct PartnerCreateDBRequest {
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub sort_order: i32,
}

impl From<PartnerCreate> for PartnerCreateDBRequest {
    fn from(api: PartnerCreate) -> Self {
        Self {
            name: api.name,
            logo: api.logo,
            website: api.website,
            sort_order: api.order,
        }
    }
}

/// Database request for replacing a partner (full overwrite)
#[derive(Debug, Clone)]
pub struct PartnerUpdateDBRequest {
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub sort_order: i32,
}

impl From<PartnerUpdate> for PartnerUpdateDBRequest {
    fn from(api: PartnerUpdate) -> Self {
        Self {
            name: api.name,
            logo: api.logo,
            website: api.website,
            sort_order: api.order,
        }
    }
}

/// Database response for a partner
#[derive(Debug, Clone, FromRow)]
pub struct PartnerDBResponse {
    pub id: PartnerId,
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub sort_order: i32,
}

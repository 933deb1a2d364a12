//! Database models for application areas.

use crate::api::models::applications::{ApplicationCreate, ApplicationUpdate};
use crate::types::ApplicationId;
use sqlx::FromRow;

/// Database request for creating a new application area
#[derive(Debug, Clone)]
pub struct ApplicationCreateDBRequest {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

impl From<ApplicationCreate> for ApplicationCreateDBRequest {
    fn from(api: ApplicationCreate) -> Self {
        Self {
            name_zh: api.name_zh,
            name_en: api.name_en,
            slug: api.slug,
            desc_zh: api.desc_zh,
            desc_en: api.desc_en,
            image: api.image,
            sort_order: api.order,
        }
    }
}

/// Database request for replacing an application area (full overwrite)
#[derive(Debug, Clone)]
pub struct ApplicationUpdateDBRequest {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

impl From<ApplicationUpdate> for ApplicationUpdateDBRequest {
    fn from(api: ApplicationUpdate) -> Self {
        Self {
            name_zh: api.name_zh,
            name_en: api.name_en,
            slug: api.slug,
            desc_zh: api.desc_zh,
            desc_en: api.desc_en,
            image: api.image,
            sort_order: api.order,
        }
    }
}

/// Database response for an application area
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationDBResponse {
    pub id: ApplicationId,
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

//! Database models for categories.

use crate::api::models::categories::{CategoryCreate, CategoryUpdate};
use crate::types::CategoryId;
use sqlx::FromRow;

/// Database request for creating a new category
#[derive(Debug, Clone)]
pub struct CategoryCreateDBRequest {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

impl From<CategoryCreate> for CategoryCreateDBRequest {
    fn from(api: CategoryCreate) -> Self {
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

/// Database request for replacing a category (full overwrite)
#[derive(Debug, Clone)]
pub struct CategoryUpdateDBRequest {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

impl From<CategoryUpdate> for CategoryUpdateDBRequest {
    fn from(api: CategoryUpdate) -> Self {
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

/// Database response for a category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryDBResponse {
    pub id: CategoryId,
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    pub image: Option<String>,
    pub sort_order: i32,
}

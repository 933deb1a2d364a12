//! Database models for products.

use crate::api::models::products::{ProductCreate, ProductUpdate};
use crate::types::ProductId;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new product
#[derive(Debug, Clone)]
pub struct ProductCreateDBRequest {
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub desc_zh: String,
    pub desc_en: String,
    /// Category slug (soft reference, may dangle)
    pub category: String,
    pub image: Option<String>,
    pub specs: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub certifications: Option<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub sort_order: i32,
}

impl From<ProductCreate> for ProductCreateDBRequest {
    fn from(api: ProductCreate) -> Self {
        Self {
            code: api.code,
            name_zh: api.name_zh,
            name_en: api.name_en,
            desc_zh: api.desc_zh.unwrap_or_default(),
            desc_en: api.desc_en.unwrap_or_default(),
            category: api.category,
            image: api.image,
            specs: api.specs,
            features: api.features,
            applications: api.applications,
            certifications: api.certifications,
            is_new: api.is_new,
            is_featured: api.is_featured,
            sort_order: api.order,
        }
    }
}

/// Database request for replacing a product (full overwrite, last writer wins).
/// The code is mutable at the storage layer; the API layer refuses changes
/// that would collide with another product's code.
#[derive(Debug, Clone)]
pub struct ProductUpdateDBRequest {
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub desc_zh: String,
    pub desc_en: String,
    pub category: String,
    pub image: Option<String>,
    pub specs: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub certifications: Option<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub sort_order: i32,
}

impl From<ProductUpdate> for ProductUpdateDBRequest {
    fn from(api: ProductUpdate) -> Self {
        Self {
            code: api.code,
            name_zh: api.name_zh,
            name_en: api.name_en,
            desc_zh: api.desc_zh.unwrap_or_default(),
            desc_en: api.desc_en.unwrap_or_default(),
            category: api.category,
            image: api.image,
            specs: api.specs,
            features: api.features,
            applications: api.applications,
            certifications: api.certifications,
            is_new: api.is_new,
            is_featured: api.is_featured,
            sort_order: api.order,
        }
    }
}

/// Database response for a product
#[derive(Debug, Clone, FromRow)]
pub struct ProductDBResponse {
    pub id: ProductId,
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub desc_zh: String,
    pub desc_en: String,
    pub category: String,
    pub image: Option<String>,
    pub specs: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub certifications: Option<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Trimmed projection for the admin dashboard's recent-products list
#[derive(Debug, Clone, FromRow)]
pub struct RecentProductDBResponse {
    pub id: ProductId,
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub created_at: DateTime<Utc>,
}

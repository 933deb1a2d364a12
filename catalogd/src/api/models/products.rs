//! API models for products.
//!
//! Wire format is camelCase to match what the admin console and public site
//! already speak. Responses carry both raw field pairs (`nameZh`/`nameEn`)
//! and the `name`/`description` fields resolved for the requested locale.

use crate::{db::models::products::{ProductDBResponse, RecentProductDBResponse}, locale::Locale, types::ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub desc_zh: String,
    pub desc_en: String,
    /// Display name resolved for the requested locale
    pub name: String,
    /// Display description resolved for the requested locale
    pub description: String,
    /// Category slug; may refer to a deleted category
    pub category: String,
    pub image: Option<String>,
    pub specs: Option<String>,
    pub features: Option<String>,
    pub applications: Option<String>,
    pub certifications: Option<String>,
    pub is_new: bool,
    pub is_featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_db(db: ProductDBResponse, locale: Locale) -> Self {
        let name = locale.pick(&db.name_zh, &db.name_en).to_string();
        let description = locale.pick(&db.desc_zh, &db.desc_en).to_string();
        Self {
            id: db.id,
            code: db.code,
            name_zh: db.name_zh,
            name_en: db.name_en,
            desc_zh: db.desc_zh,
            desc_en: db.desc_en,
            name,
            description,
            category: db.category,
            image: db.image,
            specs: db.specs,
            features: db.features,
            applications: db.applications,
            certifications: db.certifications,
            is_new: db.is_new,
            is_featured: db.is_featured,
            order: db.sort_order,
            created_at: db.created_at,
        }
    }
}

/// Product detail with up to four other products from the same category.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub related_products: Vec<ProductResponse>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    #[serde(default)]
    pub desc_zh: Option<String>,
    #[serde(default)]
    pub desc_en: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub applications: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
}

/// Full replacement payload; same shape as create.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    #[serde(default)]
    pub desc_zh: Option<String>,
    #[serde(default)]
    pub desc_en: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub applications: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order: i32,
}

/// Query parameters for product listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListProductsQuery {
    /// Filter to a single category slug
    pub category: Option<String>,
    /// Case-insensitive substring match on names and code
    pub search: Option<String>,
    /// Only featured products
    pub featured: Option<bool>,
    /// Only products flagged as new
    pub new: Option<bool>,
    /// Cap the number of results
    pub limit: Option<i64>,
    /// Display locale for resolved fields (default zh)
    pub lang: Option<Locale>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct GetProductQuery {
    pub lang: Option<Locale>,
}

/// Recent product entry for the admin dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentProductResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ProductId,
    pub code: String,
    pub name_zh: String,
    pub name_en: String,
    pub created_at: DateTime<Utc>,
}

impl From<RecentProductDBResponse> for RecentProductResponse {
    fn from(db: RecentProductDBResponse) -> Self {
        Self {
            id: db.id,
            code: db.code,
            name_zh: db.name_zh,
            name_en: db.name_en,
            created_at: db.created_at,
        }
    }
}

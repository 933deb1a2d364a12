//! API models for categories.

use crate::{db::models::categories::CategoryDBResponse, locale::Locale, types::CategoryId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CategoryId,
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    pub desc_zh: Option<String>,
    pub desc_en: Option<String>,
    /// Display name resolved for the requested locale
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub order: i32,
}

impl CategoryResponse {
    pub fn from_db(db: CategoryDBResponse, locale: Locale) -> Self {
        let name = locale.pick(&db.name_zh, &db.name_en).to_string();
        let description = locale
            .pick_opt(db.desc_zh.as_deref(), db.desc_en.as_deref())
            .map(str::to_string);
        Self {
            id: db.id,
            name_zh: db.name_zh,
            name_en: db.name_en,
            slug: db.slug,
            desc_zh: db.desc_zh,
            desc_en: db.desc_en,
            name,
            description,
            image: db.image,
            order: db.sort_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    #[serde(default)]
    pub desc_zh: Option<String>,
    #[serde(default)]
    pub desc_en: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name_zh: String,
    pub name_en: String,
    pub slug: String,
    #[serde(default)]
    pub desc_zh: Option<String>,
    #[serde(default)]
    pub desc_en: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListCategoriesQuery {
    /// Display locale for resolved fields (default zh)
    pub lang: Option<Locale>,
}

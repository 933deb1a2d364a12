//! API models for application areas.

use crate::{db::models::applications::ApplicationDBResponse, locale::Locale, types::ApplicationId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ApplicationId,
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

impl ApplicationResponse {
    pub fn from_db(db: ApplicationDBResponse, locale: Locale) -> Self {
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
pub struct ApplicationCreate {
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
pub struct ApplicationUpdate {
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
pub struct ListApplicationsQuery {
    pub lang: Option<Locale>,
}

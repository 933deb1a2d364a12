//! API models for homepage banners.

use crate::{db::models::banners::BannerDBResponse, locale::Locale, types::BannerId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BannerId,
    pub title_zh: String,
    pub title_en: String,
    pub subtitle_zh: Option<String>,
    pub subtitle_en: Option<String>,
    /// Display title resolved for the requested locale
    pub title: String,
    pub subtitle: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

impl BannerResponse {
    pub fn from_db(db: BannerDBResponse, locale: Locale) -> Self {
        let title = locale.pick(&db.title_zh, &db.title_en).to_string();
        let subtitle = locale
            .pick_opt(db.subtitle_zh.as_deref(), db.subtitle_en.as_deref())
            .map(str::to_string);
        Self {
            id: db.id,
            title_zh: db.title_zh,
            title_en: db.title_en,
            subtitle_zh: db.subtitle_zh,
            subtitle_en: db.subtitle_en,
            title,
            subtitle,
            image: db.image,
            link: db.link,
            order: db.sort_order,
            is_active: db.is_active,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerCreate {
    pub title_zh: String,
    pub title_en: String,
    #[serde(default)]
    pub subtitle_zh: Option<String>,
    #[serde(default)]
    pub subtitle_en: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    pub title_zh: String,
    pub title_en: String,
    #[serde(default)]
    pub subtitle_zh: Option<String>,
    #[serde(default)]
    pub subtitle_en: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListBannersQuery {
    pub lang: Option<Locale>,
}

//! Database models for homepage banners.

use crate::api::models::banners::{BannerCreate, BannerUpdate};
use crate::types::BannerId;
use sqlx::FromRow;

/// Database request for creating a new banner
#[derive(Debug, Clone)]
pub struct BannerCreateDBRequest {
    pub title_zh: String,
    pub title_en: String,
    pub subtitle_zh: Option<String>,
    pub subtitle_en: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<BannerCreate> for BannerCreateDBRequest {
    fn from(api: BannerCreate) -> Self {
        Self {
            title_zh: api.title_zh,
            title_en: api.title_en,
            subtitle_zh: api.subtitle_zh,
            subtitle_en: api.subtitle_en,
            image: api.image,
            link: api.link,
            sort_order: api.order,
            is_active: api.is_active,
        }
    }
}

/// Database request for replacing a banner (full overwrite)
#[derive(Debug, Clone)]
pub struct BannerUpdateDBRequest {
    pub title_zh: String,
    pub title_en: String,
    pub subtitle_zh: Option<String>,
    pub subtitle_en: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<BannerUpdate> for BannerUpdateDBRequest {
    fn from(api: BannerUpdate) -> Self {
        Self {
            title_zh: api.title_zh,
            title_en: api.title_en,
            subtitle_zh: api.subtitle_zh,
            subtitle_en: api.subtitle_en,
            image: api.image,
            link: api.link,
            sort_order: api.order,
            is_active: api.is_active,
        }
    }
}

/// Database response for a banner
#[derive(Debug, Clone, FromRow)]
pub struct BannerDBResponse {
    pub id: BannerId,
    pub title_zh: String,
    pub title_en: String,
    pub subtitle_zh: Option<String>,
    pub subtitle_en: Option<String>,
    pub image: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

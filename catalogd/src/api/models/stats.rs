//! API models for the admin dashboard stats endpoint.

use crate::api::models::products::RecentProductResponse;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub products: i64,
    pub categories: i64,
    pub banners: i64,
    pub recent_products: Vec<RecentProductResponse>,
}

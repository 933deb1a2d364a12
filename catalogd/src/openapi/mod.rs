//! OpenAPI documentation for the catalog API.
//!
//! Covers both surfaces: the public read-only catalog endpoints under
//! `/api/*` and the session-authenticated admin endpoints under
//! `/api/admin/*`. The rendered docs are served at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;

/// Registers the session-cookie security scheme referenced by the admin paths.
struct CookieSecurityAddon;

impl Modify for CookieSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "CookieAuth".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "catalog_session",
                    "Session cookie issued by POST /api/auth/login.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "Bilingual (zh/en) product catalog with a session-authenticated admin surface."
    ),
    paths(
        // Public catalog
        api::handlers::products::list_products,
        api::handlers::products::get_product,
        api::handlers::categories::list_categories,
        api::handlers::categories::get_category,
        api::handlers::applications::list_applications,
        api::handlers::applications::get_application,
        api::handlers::banners::list_banners,
        api::handlers::partners::list_partners,
        // Authentication
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::auth::me,
        // Admin
        api::handlers::products::admin_list_products,
        api::handlers::products::create_product,
        api::handlers::products::update_product,
        api::handlers::products::delete_product,
        api::handlers::categories::create_category,
        api::handlers::categories::update_category,
        api::handlers::categories::delete_category,
        api::handlers::applications::create_application,
        api::handlers::applications::update_application,
        api::handlers::applications::delete_application,
        api::handlers::banners::admin_list_banners,
        api::handlers::banners::create_banner,
        api::handlers::banners::update_banner,
        api::handlers::banners::delete_banner,
        api::handlers::partners::create_partner,
        api::handlers::partners::update_partner,
        api::handlers::partners::delete_partner,
        api::handlers::stats::get_stats,
    ),
    components(schemas(
        api::models::products::ProductResponse,
        api::models::products::ProductDetailResponse,
        api::models::products::ProductCreate,
        api::models::products::ProductUpdate,
        api::models::products::RecentProductResponse,
        api::models::categories::CategoryResponse,
        api::models::categories::CategoryCreate,
        api::models::categories::CategoryUpdate,
        api::models::applications::ApplicationResponse,
        api::models::applications::ApplicationCreate,
        api::models::applications::ApplicationUpdate,
        api::models::banners::BannerResponse,
        api::models::banners::BannerCreate,
        api::models::banners::BannerUpdate,
        api::models::partners::PartnerResponse,
        api::models::partners::PartnerCreate,
        api::models::partners::PartnerUpdate,
        api::models::stats::StatsResponse,
        api::models::users::LoginRequest,
        api::models::users::AuthResponse,
        api::models::users::AuthSuccessResponse,
        api::models::users::UserResponse,
        api::models::users::CurrentUser,
        api::models::users::Role,
    )),
    modifiers(&CookieSecurityAddon),
    tags(
        (name = "products", description = "Public product catalog"),
        (name = "categories", description = "Public product categories"),
        (name = "applications", description = "Public application scenarios"),
        (name = "banners", description = "Public homepage banners"),
        (name = "partners", description = "Public partner list"),
        (name = "auth", description = "Session authentication"),
        (name = "admin", description = "Admin content management (requires session cookie)"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document should serialize");
        assert!(json.contains("/api/products"));
        assert!(json.contains("/api/admin/stats"));
        assert!(json.contains("CookieAuth"));
    }

    #[test]
    fn test_id_fields_are_uuid_strings() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("document should serialize");

        for schema in ["ProductResponse", "CategoryResponse", "BannerResponse"] {
            let id = &json["components"]["schemas"][schema]["properties"]["id"];
            assert_eq!(id["type"], "string", "{schema} id type");
            assert_eq!(id["format"], "uuid", "{schema} id format");
        }

        let update_params = &json["paths"]["/api/admin/products/{id}"]["put"]["parameters"];
        let id_param = update_params
            .as_array()
            .and_then(|params| params.iter().find(|p| p["name"] == "id"))
            .expect("path parameter should be documented");
        assert_eq!(id_param["schema"]["format"], "uuid");
    }
}

/// OpenAPI documentation for the blog service
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Service API",
        version = "1.0.0",
        description = "Owner-scoped posts. Each signed-in user lists and creates their own posts; anonymous callers receive 401 with an empty object."
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    paths(
        crate::handlers::health::health_summary,
        crate::handlers::posts::list_posts,
        crate::handlers::posts::create_post,
    ),
    components(schemas(crate::models::Post, crate::models::PostParams)),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Listing and creating the caller's posts"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("_blog_session"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token, same value as the cookie"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "csrf_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-CSRF-Token"))),
            );
        }
    }
}

impl ApiDoc {
    pub fn openapi_json_path() -> &'static str {
        "/api/v1/openapi.json"
    }
}

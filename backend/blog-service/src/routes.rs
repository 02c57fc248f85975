//! Route configuration
//!
//! Shared by the binary and the integration tests so both exercise the same
//! table. Middleware (session resolution, CSRF) is applied by the caller.

use crate::error::AppError;
use crate::handlers;
use crate::openapi::ApiDoc;
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/app", web::get().to(handlers::app_shell))
        .route(ApiDoc::openapi_json_path(), web::get().to(openapi_handler))
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(handlers::health_summary))
                .service(
                    web::resource("/posts")
                        .route(web::get().to(handlers::list_posts))
                        .route(web::post().to(handlers::create_post)),
                ),
        );
}

/// Unparseable bodies become a 400 in the service's error shape
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::BadRequest(err.to_string()).into()
}

/// OpenAPI JSON endpoint
async fn openapi_handler() -> Result<HttpResponse, AppError> {
    use utoipa::OpenApi;

    let body = serde_json::to_string(&ApiDoc::openapi()).map_err(|e| {
        tracing::error!("OpenAPI serialization failed: {}", e);
        AppError::Internal(format!("OpenAPI serialization: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, Post, PostParams};
use crate::services::PostService;
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};

/// List the signed-in user's posts
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "posts",
    responses(
        (status = 200, description = "Posts owned by the caller", body = [Post]),
        (status = 401, description = "No signed-in user; body is `{}`")
    )
)]
pub async fn list_posts(
    service: web::Data<PostService>,
    user: Option<UserId>,
) -> Result<HttpResponse> {
    let posts = service.list_posts(user).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post owned by the signed-in user
///
/// Accepts `{"post": {"title", "content"}}` or the flat object. Anonymous
/// callers get 401 even when the body does not parse.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "posts",
    request_body = PostParams,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Field name to list of violations"),
        (status = 401, description = "No signed-in user; body is `{}`"),
        (status = 403, description = "Missing or invalid X-CSRF-Token")
    )
)]
// actix_web::Result because `req?` forwards the JsonConfig error, which is already an AppError response
pub async fn create_post(
    service: web::Data<PostService>,
    user: Option<UserId>,
    req: std::result::Result<web::Json<CreatePostRequest>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let user = user.ok_or(AppError::Unauthorized)?;
    let params = req?.into_inner().into_params();
    let post = service.create_post(Some(user), params).await?;

    Ok(HttpResponse::Created().json(post))
}

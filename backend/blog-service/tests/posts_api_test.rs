//! Integration Tests: Posts API
//!
//! Drives the full route table through the session and CSRF middleware
//! against a counting in-memory store.
//!
//! Coverage:
//! - Anonymous list/create answer 401 `{}` without touching the store
//! - Listing is scoped to the signed-in owner
//! - Create assigns the owner server-side and validates presence
//! - Anti-forgery header is enforced for signed-in writes
//! - Page shell, health and OpenAPI endpoints

mod common;

use actix_middleware::{CsrfProtection, SessionAuthMiddleware, CSRF_HEADER};
use actix_web::{http::StatusCode, test, web, App};
use blog_service::models::Post;
use blog_service::routes::configure_routes;
use blog_service::services::PostService;
use common::TestContext;
use serde_json::{json, Value};

macro_rules! app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(PostService::new($ctx.store.clone())))
                .app_data(web::Data::from($ctx.csrf.clone()))
                .configure(configure_routes)
                .wrap(CsrfProtection::new($ctx.csrf.clone()))
                .wrap(SessionAuthMiddleware::new($ctx.keys.clone())),
        )
        .await
    };
}

fn post(title: &str, content: &str) -> Value {
    json!({ "post": { "title": title, "content": content } })
}

#[actix_web::test]
async fn test_anonymous_list_is_unauthorized() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({}));
    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_anonymous_create_is_unauthorized_even_when_invalid() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .set_json(post("", ""))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({}));
    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_anonymous_malformed_create_is_still_unauthorized() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_garbage_session_is_treated_as_anonymous() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_list_returns_only_callers_posts() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    for (user, title) in [(1, "a1"), (1, "a2"), (2, "b1")] {
        let resp = test::call_service(
            &app,
            ctx.create_request(user, post(title, "body")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, ctx.list_request(1).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = test::read_body_json(resp).await;
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(posts.iter().all(|p| p.owner_id == 1));

    let resp = test::call_service(&app, ctx.list_request(3).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = test::read_body_json(resp).await;
    assert!(posts.is_empty());
}

#[actix_web::test]
async fn test_create_then_list_round_trip() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let resp = test::call_service(
        &app,
        ctx.create_request(7, post("Hello", "World")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = test::read_body_json(resp).await;
    assert_eq!(created.owner_id, 7);
    assert_eq!(created.title, "Hello");
    assert_eq!(created.content, "World");

    let resp = test::call_service(&app, ctx.list_request(7).to_request()).await;
    let listed: Vec<Post> = test::read_body_json(resp).await;
    assert_eq!(listed, vec![created]);
}

#[actix_web::test]
async fn test_create_ignores_owner_in_payload() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let body = json!({ "post": { "title": "Mine", "content": "Really", "owner_id": 99 } });
    let resp = test::call_service(&app, ctx.create_request(7, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Post = test::read_body_json(resp).await;
    assert_eq!(created.owner_id, 7);
}

#[actix_web::test]
async fn test_create_accepts_flat_body() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let body = json!({ "title": "Flat", "content": "Body" });
    let resp = test::call_service(&app, ctx.create_request(4, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Post = test::read_body_json(resp).await;
    assert_eq!(created.title, "Flat");
}

#[actix_web::test]
async fn test_create_with_blank_title_persists_nothing() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let resp = test::call_service(&app, ctx.create_request(7, post("", "X")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "title": ["can't be blank"] }));
    assert_eq!(ctx.store.rows().await, 0);
}

#[actix_web::test]
async fn test_create_with_blank_content_names_only_content() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let resp = test::call_service(&app, ctx.create_request(7, post("X", "")).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "content": ["can't be blank"] }));
}

#[actix_web::test]
async fn test_create_with_missing_fields_reports_both() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let body = json!({ "post": { "title": null } });
    let resp = test::call_service(&app, ctx.create_request(7, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "content": ["can't be blank"], "title": ["can't be blank"] })
    );
    assert_eq!(ctx.store.rows().await, 0);
}

#[actix_web::test]
async fn test_duplicate_creates_get_distinct_ids() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            ctx.create_request(7, post("Same", "Same")).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Post = test::read_body_json(resp).await;
        ids.push(created.id);
    }

    assert_ne!(ids[0], ids[1]);
    assert_eq!(ctx.store.rows().await, 2);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .cookie(ctx.session_cookie(7))
        .insert_header((CSRF_HEADER, ctx.csrf.token_for(7)))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"post\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_mistyped_wrapped_field_is_bad_request_not_blank_fields() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let body = json!({ "post": { "title": "Hi", "content": 42 } });
    let resp = test::call_service(&app, ctx.create_request(7, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
    assert!(body["error"].is_string());
    assert!(body.get("title").is_none());
    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_signed_in_create_without_csrf_is_forbidden() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .cookie(ctx.session_cookie(7))
        .set_json(post("Hello", "World"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Token minted for a different user
    let req = test::TestRequest::post()
        .uri("/api/v1/posts")
        .cookie(ctx.session_cookie(7))
        .insert_header((CSRF_HEADER, ctx.csrf.token_for(8)))
        .set_json(post("Hello", "World"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    assert_eq!(ctx.store.calls(), 0);
}

#[actix_web::test]
async fn test_bearer_session_lists_posts() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let token = ctx.keys.issue(5).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/posts")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_app_shell_embeds_csrf_token_for_signed_in_user() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::get()
        .uri("/app")
        .cookie(ctx.session_cookie(7))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let expected = format!(
        r#"<meta name="csrf-token" content="{}">"#,
        ctx.csrf.token_for(7)
    );
    assert!(html.contains(&expected));

    let req = test::TestRequest::get().uri("/app").to_request();
    let resp = test::call_service(&app, req).await;
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(!html.contains("csrf-token"));
}

#[actix_web::test]
async fn test_health_and_openapi_are_public() {
    let ctx = TestContext::new();
    let app = app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "blog-service");

    let req = test::TestRequest::get()
        .uri("/api/v1/openapi.json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = test::read_body_json(resp).await;
    assert!(doc["paths"]["/api/v1/posts"].is_object());
}

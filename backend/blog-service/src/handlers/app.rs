/// Page shell for the browser client
///
/// Identified callers get the per-identity anti-forgery token in a
/// `csrf-token` meta tag; the client reads it once and echoes it back in the
/// `X-CSRF-Token` header of every state-changing request.
use actix_middleware::UserId;
use actix_web::{http::header::ContentType, web, HttpResponse};
use crypto_core::CsrfSecret;

pub const CSRF_META_NAME: &str = "csrf-token";

pub async fn app_shell(csrf: web::Data<CsrfSecret>, user: Option<UserId>) -> HttpResponse {
    let meta = match user {
        Some(UserId(user_id)) => format!(
            r#"<meta name="{}" content="{}">"#,
            CSRF_META_NAME,
            csrf.token_for(user_id)
        ),
        None => String::new(),
    };

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_shell(&meta))
}

fn render_shell(meta: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Blog</title>
{meta}
</head>
<body>
<div id="root"></div>
</body>
</html>
"#
    )
}

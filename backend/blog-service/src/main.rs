use actix_cors::Cors;
use actix_middleware::{CsrfProtection, SessionAuthMiddleware};
use actix_web::{web, App, HttpServer};
use blog_service::config::StoreKind;
use blog_service::db::{MemoryPostStore, PgPostStore, PostStore};
use blog_service::routes::configure_routes;
use blog_service::services::PostService;
use blog_service::Config;
use crypto_core::{CsrfSecret, SessionKeys};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Blog Service
///
/// # Routes
///
/// - `GET /app` - page shell carrying the caller's CSRF token
/// - `GET /api/v1/posts` - the caller's posts
/// - `POST /api/v1/posts` - create a post owned by the caller
/// - `GET /api/v1/health` - liveness
/// - `GET /api/v1/openapi.json` - API document
///
/// # Commands
///
/// - `blog-service healthcheck` checks a running instance (container healthchecks)
/// - `blog-service issue-session <user_id>` prints a signed session token
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    let mut args = std::env::args().skip(1);
    let command = args.next();

    if matches!(command.as_deref(), Some("healthcheck") | Some("healthcheck-http")) {
        return healthcheck().await;
    }

    init_tracing();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let session_keys = Arc::new(
        SessionKeys::from_secret(config.session.secret.as_bytes(), config.session.ttl_hours)
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to initialize session keys: {e}"),
                )
            })?,
    );

    if command.as_deref() == Some("issue-session") {
        return issue_session(&session_keys, args.next());
    }

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = build_store(&config).await?;
    let post_service = web::Data::new(PostService::new(store));
    let csrf_secret = Arc::new(CsrfSecret::new(config.session.csrf_secret.as_bytes()));
    let csrf_data = web::Data::from(csrf_secret.clone());

    let bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(post_service.clone())
            .app_data(csrf_data.clone())
            .configure(configure_routes)
            .wrap(CsrfProtection::new(csrf_secret.clone()))
            .wrap(SessionAuthMiddleware::new(session_keys.clone()))
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
    })
    .bind(&bind_address)?
    .shutdown_timeout(30)
    .run()
    .await
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .init();
}

async fn build_store(config: &Config) -> io::Result<Arc<dyn PostStore>> {
    match config.database.store {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory post store; posts are lost on restart");
            Ok(Arc::new(MemoryPostStore::new()))
        }
        StoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
                .connect(&config.database.url)
                .await
                .map_err(|e| {
                    tracing::error!("Database pool creation failed: {:#}", e);
                    io::Error::new(
                        io::ErrorKind::Other,
                        format!("Failed to create database pool: {e}"),
                    )
                })?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::Other,
                        format!("Failed to run migrations: {e}"),
                    )
                })?;

            tracing::info!(
                max_connections = config.database.max_connections,
                "Connected to database"
            );
            Ok(Arc::new(PgPostStore::new(pool)))
        }
    }
}

fn issue_session(keys: &SessionKeys, user_id: Option<String>) -> io::Result<()> {
    let user_id: i64 = user_id
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "usage: blog-service issue-session <user_id>",
            )
        })?;

    let token = keys
        .issue(user_id)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("{e:#}")))?;
    println!("{token}");
    Ok(())
}

async fn healthcheck() -> io::Result<()> {
    let port = std::env::var("BLOG_SERVICE_PORT").unwrap_or_else(|_| "8080".to_string());
    let url = format!("http://127.0.0.1:{port}/api/v1/health");

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

/// Blog Service Library
///
/// Owner-scoped posts for signed-in users: list your own posts, create new
/// ones. Identity is resolved by `actix_middleware::SessionAuthMiddleware`
/// and passed explicitly into every service call.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: route table shared by the binary and tests
/// - `models`: post records and the create payload
/// - `services`: business logic layer
/// - `db`: `PostStore` trait with Postgres and in-memory backends
/// - `error`: error types and their HTTP mapping
/// - `config`: configuration management
/// - `openapi`: generated API document
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

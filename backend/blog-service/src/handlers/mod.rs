/// HTTP handlers
///
/// - `posts`: owner-scoped list and create under `/api/v1/posts`
/// - `app`: HTML shell carrying the CSRF meta tag
/// - `health`: liveness summary
pub mod app;
pub mod health;
pub mod posts;

pub use app::app_shell;
pub use health::health_summary;
pub use posts::{create_post, list_posts};

//! Shared signing primitives for the blog services.
//!
//! - `session`: HS256 session tokens carrying the signed-in user's id
//! - `csrf`: per-identity anti-forgery tokens (HMAC-SHA256)

pub mod csrf;
pub mod session;

pub use csrf::CsrfSecret;
pub use session::{Claims, SessionKeys};

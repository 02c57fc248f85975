//! # Actix Middleware Library
//!
//! Request-scoped identity and anti-forgery middleware for the blog services
//!
//! ## Modules
//! - `session_auth`: resolves the signed-in user from the session token
//! - `csrf`: rejects state-changing requests without a valid `X-CSRF-Token`

pub mod csrf;
pub mod session_auth;

pub use csrf::{CsrfProtection, CSRF_HEADER};
pub use session_auth::{current_identity, SessionAuthMiddleware, UserId, SESSION_COOKIE};

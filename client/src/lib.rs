//! Client data layer for the blog service
//!
//! - `csrf`: reads the anti-forgery token embedded in the page shell
//! - `api`: HTTP calls for listing and creating posts
//! - `draft`: immutable new-post draft and its lifecycle
//! - `app`: list / new-post view models and navigation
//! - `config`: base URL and session token

pub mod api;
pub mod app;
pub mod config;
pub mod csrf;
pub mod draft;
pub mod error;

pub use api::{CreateOutcome, FieldErrors, Post, PostsClient};
pub use app::{BlogApp, NewPostView, PostListView, Route};
pub use config::ClientConfig;
pub use csrf::CsrfToken;
pub use draft::{DraftField, DraftState, PostDraft};
pub use error::{ClientError, Result};

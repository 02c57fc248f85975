//! Shared fixtures for blog-service integration tests
//!
//! `CountingStore` wraps the in-memory store and records every call so tests
//! can assert that rejected requests never reached persistence.

#![allow(dead_code)]

use actix_middleware::{CSRF_HEADER, SESSION_COOKIE};
use actix_web::{cookie::Cookie, test::TestRequest};
use blog_service::db::{MemoryPostStore, PostStore};
use blog_service::models::{NewPost, Post};
use blog_service::Result;
use crypto_core::{CsrfSecret, SessionKeys};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SECRET: &[u8] = b"integration-test-session-secret";

/// In-memory store that counts calls
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryPostStore,
    calls: AtomicUsize,
}

impl CountingStore {
    /// Number of store operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Rows persisted, read without counting
    pub async fn rows(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait::async_trait]
impl PostStore for CountingStore {
    async fn posts_for_owner(&self, owner_id: i64) -> Result<Vec<Post>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.posts_for_owner(owner_id).await
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(post).await
    }
}

pub struct TestContext {
    pub keys: Arc<SessionKeys>,
    pub csrf: Arc<CsrfSecret>,
    pub store: Arc<CountingStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            keys: Arc::new(SessionKeys::from_secret(SECRET, 1).unwrap()),
            csrf: Arc::new(CsrfSecret::new(SECRET)),
            store: Arc::new(CountingStore::default()),
        }
    }

    pub fn session_cookie(&self, user_id: i64) -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, self.keys.issue(user_id).unwrap())
    }

    pub fn list_request(&self, user_id: i64) -> TestRequest {
        TestRequest::get()
            .uri("/api/v1/posts")
            .cookie(self.session_cookie(user_id))
    }

    /// Signed-in create with a valid anti-forgery header
    pub fn create_request(&self, user_id: i64, body: serde_json::Value) -> TestRequest {
        TestRequest::post()
            .uri("/api/v1/posts")
            .cookie(self.session_cookie(user_id))
            .insert_header((CSRF_HEADER, self.csrf.token_for(user_id)))
            .set_json(body)
    }
}

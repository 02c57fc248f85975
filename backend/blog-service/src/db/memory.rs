use super::PostStore;
use crate::error::Result;
use crate::models::{NewPost, Post};
use chrono::Utc;
use tokio::sync::RwLock;

/// In-process post store.
///
/// Ids start at 1 and increase by one per insert; nothing survives a restart.
#[derive(Default)]
pub struct MemoryPostStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    posts: Vec<Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows across all owners
    pub async fn len(&self) -> usize {
        self.inner.read().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait::async_trait]
impl PostStore for MemoryPostStore {
    async fn posts_for_owner(&self, owner_id: i64) -> Result<Vec<Post>> {
        let inner = self.inner.read().await;
        Ok(inner
            .posts
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let created = Post {
            id: inner.last_id,
            title: post.title,
            content: post.content,
            owner_id: post.owner_id,
            created_at: now,
            updated_at: now,
        };
        inner.posts.push(created.clone());

        Ok(created)
    }
}

use super::PostStore;
use crate::error::Result;
use crate::models::{NewPost, Post};
use sqlx::PgPool;

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostStore for PgPostStore {
    async fn posts_for_owner(&self, owner_id: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, owner_id, created_at, updated_at
            FROM posts
            WHERE owner_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn insert(&self, post: NewPost) -> Result<Post> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}

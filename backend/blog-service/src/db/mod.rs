/// Post entity store
///
/// `PostStore` is the only way handlers reach persisted posts. Two backends:
/// - `PgPostStore`: PostgreSQL via sqlx (production)
/// - `MemoryPostStore`: process-local, for local runs and tests
use crate::error::Result;
use crate::models::{NewPost, Post};

pub mod memory;
pub mod post_repo;

pub use memory::MemoryPostStore;
pub use post_repo::PgPostStore;

#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Posts owned by `owner_id`, oldest first
    async fn posts_for_owner(&self, owner_id: i64) -> Result<Vec<Post>>;

    /// Append one post and return it with its assigned id and timestamps
    async fn insert(&self, post: NewPost) -> Result<Post>;
}

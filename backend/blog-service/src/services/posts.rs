/// Post service - owner-scoped listing and creation
///
/// Every operation takes the caller's identity explicitly. `None` means the
/// authentication gate could not resolve anyone, and the store is never
/// consulted in that case.
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::models::{NewPost, Post, PostParams};
use actix_middleware::UserId;
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Posts owned by the caller, oldest first
    pub async fn list_posts(&self, identity: Option<UserId>) -> Result<Vec<Post>> {
        let UserId(owner_id) = identity.ok_or(AppError::Unauthorized)?;

        let posts = self.store.posts_for_owner(owner_id).await?;
        tracing::debug!(user_id = owner_id, count = posts.len(), "Listed posts");

        Ok(posts)
    }

    /// Validate `params` and persist a post owned by the caller.
    ///
    /// The owner always comes from `identity`; there is no way to pass one in
    /// through `params`.
    pub async fn create_post(&self, identity: Option<UserId>, params: PostParams) -> Result<Post> {
        let UserId(owner_id) = identity.ok_or(AppError::Unauthorized)?;

        let new_post = NewPost::from_params(owner_id, params).map_err(|errors| {
            let err = AppError::from(errors);
            tracing::info!(user_id = owner_id, "Rejected post: {}", err);
            err
        })?;

        let post = self.store.insert(new_post).await?;
        tracing::info!(user_id = owner_id, post_id = post.id, "Post created");

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryPostStore;

    fn service() -> (PostService, Arc<MemoryPostStore>) {
        let store = Arc::new(MemoryPostStore::new());
        (PostService::new(store.clone()), store)
    }

    fn params(title: &str, content: &str) -> PostParams {
        PostParams {
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_unauthorized() {
        let (service, store) = service();

        assert!(matches!(
            service.list_posts(None).await,
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            service.create_post(None, params("", "")).await,
            Err(AppError::Unauthorized)
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_assigns_owner_from_identity() {
        let (service, _) = service();

        let post = service
            .create_post(Some(UserId(7)), params("Hello", "World"))
            .await
            .unwrap();
        assert_eq!(post.owner_id, 7);

        let listed = service.list_posts(Some(UserId(7))).await.unwrap();
        assert_eq!(listed, vec![post]);
    }

    #[tokio::test]
    async fn test_invalid_post_is_not_persisted() {
        let (service, store) = service();

        let err = service
            .create_post(Some(UserId(7)), params("X", ""))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert!(fields.contains_key("content"));
                assert!(!fields.contains_key("title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(store.is_empty().await);
    }
}

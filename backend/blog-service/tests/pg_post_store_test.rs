//! Integration Tests: PostgreSQL post store
//!
//! Needs a reachable database; run with
//! `DATABASE_URL=postgres://... cargo test --test pg_post_store_test -- --ignored`

use blog_service::db::{PgPostStore, PostStore};
use blog_service::models::{NewPost, PostParams};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn setup_pool() -> PgPool {
    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL env var required");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&db_url)
        .await
        .expect("failed to connect to DATABASE_URL");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    pool
}

async fn create_user(pool: &PgPool) -> i64 {
    sqlx::query_scalar("INSERT INTO users DEFAULT VALUES RETURNING id")
        .fetch_one(pool)
        .await
        .expect("insert user")
}

fn new_post(owner_id: i64, title: &str) -> NewPost {
    NewPost::from_params(
        owner_id,
        PostParams {
            title: title.to_string(),
            content: "body".to_string(),
        },
    )
    .unwrap()
}

#[tokio::test]
#[ignore] // Run with: cargo test --test pg_post_store_test -- --ignored
async fn test_insert_and_list_scoped_to_owner() {
    let pool = setup_pool().await;
    let alice = create_user(&pool).await;
    let bob = create_user(&pool).await;
    let store = PgPostStore::new(pool);

    let first = store.insert(new_post(alice, "first")).await.unwrap();
    let second = store.insert(new_post(alice, "second")).await.unwrap();
    store.insert(new_post(bob, "other")).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.owner_id, alice);

    let listed = store.posts_for_owner(alice).await.unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[tokio::test]
#[ignore]
async fn test_unknown_owner_is_rejected_by_foreign_key() {
    let pool = setup_pool().await;
    let store = PgPostStore::new(pool);

    let err = store.insert(new_post(i64::MAX, "orphan")).await;
    assert!(err.is_err());
}

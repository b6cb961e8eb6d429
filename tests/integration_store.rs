mod common;
use common::{check_store_contract, create_test_db};
use restful_blog::plugins::blog::{InMemoryBlogStore, PgBlogStore};

#[tokio::test]
async fn in_memory_store_honours_contract() -> anyhow::Result<()> {
    check_store_contract(InMemoryBlogStore::new().into_arc()).await
}

#[tokio::test]
async fn postgres_store_honours_contract() -> anyhow::Result<()> {
    let Some(test_db) = create_test_db().await? else {
        return Ok(());
    };
    let store = PgBlogStore::new(test_db.pool.clone()).into_arc();
    let outcome = check_store_contract(store).await;
    test_db.cleanup().await?;
    outcome
}

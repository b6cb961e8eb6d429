#![allow(dead_code)]

use chrono::Utc;
use restful_blog::db::{self, StoreError};
use restful_blog::kernel::{build_app, Plugin};
use restful_blog::plugins::blog::{BlogFields, BlogPlugin, BlogStore, DynBlogStore, NewBlog};
use restful_blog::plugins::health::HealthPlugin;
use restful_blog::views::Views;
use std::sync::Arc;
use tokio::net::TcpListener;
use uuid::Uuid;

/// A throwaway database, dropped by `TestDb::cleanup`.
pub struct TestDb {
    maintenance_url: String,
    pub name: String,
    pub pool: db::DbPool,
}

impl TestDb {
    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.pool.close().await;
        let maint = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&self.maintenance_url)
            .await?;
        sqlx::query(&format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", self.name))
            .execute(&maint)
            .await?;
        Ok(())
    }
}

/// Returns `None` when `TEST_DATABASE_URL` is not set so Postgres-backed tests can skip.
pub async fn create_test_db() -> anyhow::Result<Option<TestDb>> {
    let Ok(test_db) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping postgres test");
        return Ok(None);
    };
    let mut maintenance_url = test_db.clone();
    if let Some(idx) = maintenance_url.rfind('/') {
        maintenance_url.replace_range(idx + 1.., "postgres");
    }
    let base_db_name = test_db.rsplit('/').next().unwrap().split('?').next().unwrap();
    let name = format!("{}_{}", base_db_name, Uuid::new_v4().simple());
    let mut unique_db_url = test_db.clone();
    if let Some(idx) = unique_db_url.rfind('/') {
        unique_db_url.replace_range(idx + 1.., &name);
    }

    let maint = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&maintenance_url)
        .await?;
    sqlx::query(&format!("CREATE DATABASE \"{}\"", name)).execute(&maint).await?;
    maint.close().await;

    let pool = db::init_db(&unique_db_url).await?;
    Ok(Some(TestDb { maintenance_url, name, pool }))
}

pub async fn spawn_app(store: DynBlogStore) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let views = Arc::new(Views::new()?);
    let plugins: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin::new(store.clone())),
        Box::new(BlogPlugin::new(store, views)),
    ];
    let app = build_app(&plugins).await;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    Ok((format!("http://{}", addr), server_handle))
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

pub fn fields(title: &str, image: &str, body: &str) -> BlogFields {
    BlogFields { title: title.into(), image: image.into(), body: body.into() }
}

/// Lifecycle properties every `BlogStore` backend must satisfy. Expects an empty store.
pub async fn check_store_contract(store: DynBlogStore) -> anyhow::Result<()> {
    // create -> get returns the input plus id and created
    let created = store.create(NewBlog::from(fields("Hello", "http://x/img.png", "world"))).await?;
    let got = store.get_by_id(created.id).await?;
    assert_eq!(got, created);
    assert_eq!((got.title.as_str(), got.image.as_str(), got.body.as_str()), ("Hello", "http://x/img.png", "world"));
    assert!(got.created <= Utc::now());

    let all = store.list_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "Hello");

    // update keeps id and created
    let updated = store.update_by_id(created.id, fields("Hello2", "http://x/2.png", "world2")).await?;
    assert_eq!(updated.id, created.id);
    let got = store.get_by_id(created.id).await?;
    assert_eq!(got.title, "Hello2");
    assert_eq!(got.body, "world2");
    assert_eq!(got.created, created.created);

    // absent ids: NotFound and no mutation
    let missing = Uuid::new_v4();
    assert!(matches!(store.get_by_id(missing).await, Err(StoreError::NotFound)));
    assert!(matches!(store.update_by_id(missing, fields("x", "x", "x")).await, Err(StoreError::NotFound)));
    assert!(matches!(store.delete_by_id(missing).await, Err(StoreError::NotFound)));
    assert_eq!(store.list_all().await?, vec![got]);

    // delete once, then NotFound
    store.delete_by_id(created.id).await?;
    assert!(matches!(store.get_by_id(created.id).await, Err(StoreError::NotFound)));
    assert!(matches!(store.delete_by_id(created.id).await, Err(StoreError::NotFound)));
    assert!(store.list_all().await?.is_empty());

    // identical input, distinct records
    let a = store.create(NewBlog::from(fields("same", "", ""))).await?;
    let b = store.create(NewBlog::from(fields("same", "", ""))).await?;
    assert_ne!(a.id, b.id);
    assert_eq!(store.list_all().await?.len(), 2);

    store.ping().await?;
    Ok(())
}

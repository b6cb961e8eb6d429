use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::db::{self, DbPool, StoreError};
use crate::plugins::blog::memory::InMemoryBlogStore;
use crate::plugins::blog::models::{Blog, BlogFields, NewBlog};

/// The five blog operations the routes need from persistence.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    async fn create(&self, fields: NewBlog) -> Result<Blog, StoreError>;

    async fn list_all(&self) -> Result<Vec<Blog>, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Blog, StoreError>;

    async fn update_by_id(&self, id: Uuid, fields: BlogFields) -> Result<Blog, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    /// Releases connections. Called once at shutdown.
    async fn close(&self) {}
}

pub type DynBlogStore = Arc<dyn BlogStore>;

const BLOG_COLUMNS: &str = "id, title, image, body, created";

pub struct PgBlogStore {
    pool: DbPool,
}

impl PgBlogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn into_arc(self) -> DynBlogStore {
        Arc::new(self)
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn create(&self, fields: NewBlog) -> Result<Blog, StoreError> {
        let sql = format!(
            "INSERT INTO blogs (title, image, body, created) VALUES ($1, $2, $3, COALESCE($4, now())) RETURNING {BLOG_COLUMNS}"
        );
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(&fields.title)
            .bind(&fields.image)
            .bind(&fields.body)
            .bind(fields.created)
            .fetch_one(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn list_all(&self) -> Result<Vec<Blog>, StoreError> {
        let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created ASC, id ASC");
        let blogs = sqlx::query_as::<_, Blog>(&sql).fetch_all(&self.pool).await?;
        Ok(blogs)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Blog, StoreError> {
        let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1");
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn update_by_id(&self, id: Uuid, fields: BlogFields) -> Result<Blog, StoreError> {
        let sql = format!(
            "UPDATE blogs SET title = $1, image = $2, body = $3 WHERE id = $4 RETURNING {BLOG_COLUMNS}"
        );
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(&fields.title)
            .bind(&fields.image)
            .bind(&fields.body)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Opens the backend selected by `BLOG_STORE`.
pub async fn open_store(config: &Config) -> anyhow::Result<DynBlogStore> {
    match config.store {
        StoreBackend::Postgres => {
            let pool = db::init_db(&config.database_url).await?;
            Ok(PgBlogStore::new(pool).into_arc())
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory blog store; records are lost on restart");
            Ok(InMemoryBlogStore::new().into_arc())
        }
    }
}

use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

/// Failure of a single store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("blog not found")]
    NotFound,

    #[error("store error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) => StoreError::Backend(db.message().to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Connects to Postgres and applies pending migrations.
pub async fn init_db(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

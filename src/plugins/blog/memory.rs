use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::StoreError;
use crate::plugins::blog::models::{Blog, BlogFields, NewBlog};
use crate::plugins::blog::repo::{BlogStore, DynBlogStore};

/// Process-local store. Keeps insertion order.
#[derive(Default)]
pub struct InMemoryBlogStore {
    inner: Mutex<Vec<Blog>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_arc(self) -> DynBlogStore {
        Arc::new(self)
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn create(&self, fields: NewBlog) -> Result<Blog, StoreError> {
        let blog = Blog {
            id: Uuid::new_v4(),
            title: fields.title,
            image: fields.image,
            body: fields.body,
            created: fields.created.unwrap_or_else(Utc::now),
        };
        self.inner.lock().push(blog.clone());
        Ok(blog)
    }

    async fn list_all(&self) -> Result<Vec<Blog>, StoreError> {
        Ok(self.inner.lock().clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Blog, StoreError> {
        self.inner
            .lock()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_by_id(&self, id: Uuid, fields: BlogFields) -> Result<Blog, StoreError> {
        let mut blogs = self.inner.lock();
        let blog = blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        blog.title = fields.title;
        blog.image = fields.image;
        blog.body = fields.body;
        Ok(blog.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut blogs = self.inner.lock();
        let idx = blogs
            .iter()
            .position(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        blogs.remove(idx);
        Ok(())
    }
}

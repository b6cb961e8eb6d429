use axum::{Router, routing::get, Extension};
use crate::kernel::Plugin;
use crate::plugins::blog::handlers::*;
use crate::plugins::blog::repo::DynBlogStore;
use crate::views::Views;
use std::sync::Arc;

pub struct BlogPlugin {
    pub store: DynBlogStore,
    pub views: Arc<Views>,
}

impl BlogPlugin {
    pub fn new(store: DynBlogStore, views: Arc<Views>) -> Self { Self { store, views } }
}

#[async_trait::async_trait]
impl Plugin for BlogPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(index).post(create))
            .route("/new", get(new_form))
            .route("/:id", get(show).put(update).delete(destroy))
            .route("/:id/edit", get(edit_form))
            .layer(Extension(self.store.clone()))
            .layer(Extension(self.views.clone()))
    }

    fn name(&self) -> &'static str { "blogs" }

    fn is_landing(&self) -> bool { true }

    async fn on_shutdown(&self) {
        tracing::info!("closing blog store");
        self.store.close().await;
    }
}

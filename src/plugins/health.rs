use crate::kernel::Plugin;
use crate::plugins::blog::DynBlogStore;
use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;

#[derive(Serialize)]
struct Health {
    status: &'static str,
    store: &'static str,
}

pub struct HealthPlugin {
    store: DynBlogStore,
}

impl HealthPlugin {
    pub fn new(store: DynBlogStore) -> Self {
        Self { store }
    }
}

#[axum::debug_handler]
async fn health_handler(Extension(store): Extension<DynBlogStore>) -> Json<Health> {
    let store = match store.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!("health check: {e}");
            "unavailable"
        }
    };
    Json(Health { status: "ok", store })
}

#[async_trait::async_trait]
impl Plugin for HealthPlugin {
    async fn router(&self) -> Router {
        Router::new()
            .route("/", get(health_handler))
            .layer(Extension(self.store.clone()))
    }

    fn name(&self) -> &'static str {
        "health"
    }

    async fn on_start(&self) {
        tracing::info!("health plugin started");
    }
}

use async_trait::async_trait;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::method_override::method_override;

#[async_trait]
pub trait Plugin: Send + Sync {
    async fn router(&self) -> Router;

    fn name(&self) -> &'static str;

    /// The first landing plugin receives the `GET /` redirect.
    fn is_landing(&self) -> bool {
        false
    }

    /// Optional lifecycle hook called when the kernel starts.
    async fn on_start(&self) {}
    /// Optional lifecycle hook called on shutdown.
    async fn on_shutdown(&self) {}
}

/// Builds the application router by mounting each plugin under `/{plugin.name()}`.
///
/// The mounted routes sit behind a fallback so that the method override runs
/// before any route is matched.
pub async fn build_app(plugins: &[Box<dyn Plugin>]) -> Router {
    let mut routes = Router::new();
    let mut landing: Option<String> = None;

    for plugin in plugins.iter() {
        info!("starting plugin {}", plugin.name());
        plugin.on_start().await;
        let router = plugin.router().await;
        let prefix = format!("/{}", plugin.name());
        if landing.is_none() && plugin.is_landing() {
            landing = Some(prefix.clone());
        }
        routes = routes.nest(&prefix, router);
    }

    if let Some(target) = landing {
        info!("redirecting / to {}", target);
        routes = routes.route("/", get(move || async move { Redirect::to(&target) }));
    }

    Router::new()
        .fallback_service(routes)
        .layer(axum::middleware::from_fn(method_override))
}

use axum::Router;
use dotenvy::dotenv;
use restful_blog::config::Config;
use restful_blog::kernel::{build_app, Plugin};
use restful_blog::plugins::blog::{open_store, BlogPlugin};
use restful_blog::plugins::health::HealthPlugin;
use restful_blog::views::Views;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::info!(store = ?config.store, "opening blog store");
    let store = open_store(&config).await?;
    let views = Arc::new(Views::new()?);

    let plugins_vec: Vec<Box<dyn Plugin>> = vec![
        Box::new(HealthPlugin::new(store.clone())),
        Box::new(BlogPlugin::new(store, views)),
    ];

    let plugin_names: Vec<&'static str> = plugins_vec.iter().map(|p| p.name()).collect();
    tracing::info!("mounting plugins: {:?}", plugin_names);

    let app: Router = build_app(&plugins_vec).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Blog is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
            for p in plugins_vec.iter() {
                p.on_shutdown().await;
            }
        })
        .await?;

    Ok(())
}

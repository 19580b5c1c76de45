use std::sync::Arc;

use course_posts::api::router;
use course_posts::config::{AppConfig, Backend};
use course_posts::posts_api::{MemoryPostsApi, PostsApi, PostsHttpClient};
use course_posts::services::PostStore;
use course_posts::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_posts=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let api: Arc<dyn PostsApi> = match config.backend {
        Backend::Http => {
            info!("using posts API at {}", config.api_url);
            Arc::new(PostsHttpClient::new(config.api_url.clone())?)
        }
        Backend::Memory => {
            info!("using in-memory posts backend");
            Arc::new(MemoryPostsApi::new())
        }
    };

    let mut store = PostStore::new(config.toast_duration);
    if store.load(api.as_ref()).await.is_err() {
        warn!("starting with an empty post list");
    }

    let app = router(AppState::new(store, api));

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

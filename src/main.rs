use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use linkscout::api::{create_router, AppState};
use linkscout::config::Config;
use linkscout::db::{create_redis_client, Cache};
use linkscout::services::providers::tmdb::TmdbProvider;
use linkscout::services::{BundleBuilder, RequestPacer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkscout=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let (cache, _cache_writer) = Cache::new(redis_client).await;

    let pacer = Arc::new(RequestPacer::new(Duration::from_millis(
        config.min_request_spacing_ms,
    )));
    let provider = Arc::new(TmdbProvider::new(
        cache.clone(),
        pacer,
        config.tmdb_api_url.clone(),
        config.tmdb_api_token.clone(),
    ));
    let builder = BundleBuilder::new(provider, cache.clone(), config.max_people_per_bundle);

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(config, cache, builder);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "linkscout listening");
    axum::serve(listener, app).await?;

    Ok(())
}

mod auth;
mod candidates;
mod config;
mod dashboard;
mod db;
mod errors;
mod interviews;
mod jobs;
mod labels;
mod matching;
mod models;
mod routes;
mod state;
mod store;
mod uploads;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::matching::{MatchCache, MatchClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{AtsStore, MemoryStore, PgStore};
use crate::uploads::UploadBroker;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent Hub API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: Postgres, or in-memory demo mode
    let store: Arc<dyn AtsStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; running on the in-memory store, data will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let uploads = UploadBroker::new(
        s3,
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    );
    info!("S3 upload broker initialized (bucket: {})", config.s3_bucket);

    // AI match client, with the Redis cache when configured
    let mut matcher = MatchClient::new(
        &config.ai_match_url,
        config.ai_match_timeout,
        config.ai_match_max_attempts,
    );
    match &config.redis_url {
        Some(url) if !config.match_cache_ttl.is_zero() => {
            let redis = redis::Client::open(url.as_str())?;
            matcher = matcher.with_cache(MatchCache::new(redis, config.match_cache_ttl.as_secs()));
            info!(
                "AI match cache enabled (ttl: {}s)",
                config.match_cache_ttl.as_secs()
            );
        }
        _ => info!("AI match cache disabled"),
    }
    info!("AI match client initialized ({})", config.ai_match_url);

    let state = AppState {
        store,
        uploads,
        matcher,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client for AWS, or for MinIO when `S3_ENDPOINT` is set.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "talenthub-static",
    );

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.s3_region.clone()))
        .credentials_provider(credentials);
    if let Some(endpoint) = &config.s3_endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    let sdk_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.s3_endpoint.is_some())
        .build();
    aws_sdk_s3::Client::from_conf(s3_config)
}

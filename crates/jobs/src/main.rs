mod worker;
mod workers;

use salon_core::CoreConfig;
use salon_integrations::LoggingNotifier;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "salon_jobs=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booking background workers...");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = salon_db::create_pool(&database_url).await?;

    tracing::info!("✓ Database connection established");

    let config = CoreConfig::from_env();
    let settings_ttl_secs = std::env::var("SETTINGS_CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(60);
    let settings = Arc::new(salon_core::settings::Store::with_ttl(pool.clone(), Duration::from_secs(settings_ttl_secs)));
    let notifier: Arc<dyn salon_core::Notifier> = Arc::new(LoggingNotifier::new());

    let expiration = workers::expiration::start(pool.clone(), settings.clone());
    let cleanup = workers::cleanup::start(pool.clone(), settings.clone(), notifier.clone(), config.clone());
    let reminder = workers::reminder::start(pool.clone(), settings.clone(), notifier.clone(), config.clone());

    tracing::info!("✓ expiration, cleanup, and reminder workers started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, stopping workers");

    expiration.stop().await;
    cleanup.stop().await;
    reminder.stop().await;

    tracing::info!("all workers stopped");
    Ok(())
}

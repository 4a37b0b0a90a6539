mod middleware;
mod response;
mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use middleware::AppState;
use salon_core::{CoreConfig, Orchestrator};
use salon_integrations::{HttpPaymentCollaborator, LoggingNotifier};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "salon_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booking API server...");

    let port = std::env::var("API_PORT").unwrap_or_else(|_| "3000".to_string()).parse::<u16>()?;
    let frontend_url = std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = salon_db::create_pool(&database_url).await?;
    salon_db::MIGRATOR.run(&pool).await?;

    tracing::info!("✓ Database connection established");

    let config = CoreConfig::from_env();
    let settings_ttl_secs = std::env::var("SETTINGS_CACHE_TTL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(60);
    let settings = Arc::new(salon_core::settings::Store::with_ttl(pool.clone(), Duration::from_secs(settings_ttl_secs)));

    let notifier: Arc<dyn salon_core::Notifier> = Arc::new(LoggingNotifier::new());
    let payment: Arc<dyn salon_core::PaymentCollaborator> = Arc::new(HttpPaymentCollaborator::new(
        std::env::var("PAYMENT_PROVIDER_BASE_URL").unwrap_or_default(),
        std::env::var("PAYMENT_PROVIDER_SECRET_KEY").unwrap_or_default(),
        std::env::var("PAYMENT_PROVIDER_NAME").unwrap_or_else(|_| "generic".to_string()),
    ));

    let orchestrator = Arc::new(Orchestrator::new(pool.clone(), settings, config.clone(), notifier, payment));

    tracing::info!("✓ Orchestrator wired");

    let state = AppState { orchestrator, pool, config };

    let app = Router::new()
        .route("/health", get(health_check))
        // Catalog
        .route("/api/services", get(routes::catalog::list_services))
        .route("/api/masters", get(routes::catalog::list_masters))
        // Pricing
        .route("/api/pricing/quote", get(routes::pricing::price_quote))
        // Availability
        .route("/api/availability/days", get(routes::availability::available_days))
        .route("/api/availability/slots", get(routes::availability::available_slots))
        // Client booking lifecycle
        .route("/api/bookings", post(routes::bookings::hold).get(routes::bookings::list_bookings))
        .route("/api/bookings/book", post(routes::bookings::book))
        .route("/api/bookings/:id/finalize", post(routes::bookings::finalize))
        .route("/api/bookings/:id/invoice", post(routes::bookings::create_invoice))
        .route("/api/bookings/:id/confirm-payment", post(routes::bookings::confirm_payment))
        .route("/api/bookings/:id/cancel", post(routes::bookings::cancel))
        .route("/api/bookings/:id/reschedule", post(routes::bookings::reschedule))
        .route("/api/bookings/:id/rate", post(routes::bookings::rate))
        // Master-side operations
        .route("/api/masters/:master_id/bookings/:id/done", post(routes::master::mark_done))
        .route("/api/masters/:master_id/bookings/:id/no-show", post(routes::master::mark_no_show))
        .route("/api/masters/:master_id/clients/:user_id/history", get(routes::master::client_history))
        .route(
            "/api/masters/:master_id/clients/:user_id/note",
            get(routes::master::get_client_note).put(routes::master::put_client_note),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(frontend_url.parse::<axum::http::HeaderValue>()?)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("✓ Server listening on {}", addr);
    tracing::info!("📡 API ready at http://{}:{}/api", addr.ip(), port);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

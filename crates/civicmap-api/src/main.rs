use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderName, HeaderValue, Method};
use civicmap_core::config::LayeredConfig;
use civicmap_store::memory::MemoryReportStore;
use civicmap_store::postgres::{PostgresConfig, PostgresStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civicmap_api::access::ACTOR_HEADER;
use civicmap_api::state::SharedStore;
use civicmap_api::{create_router, ApiConfig, AppState, CitizenPolicy};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicmap_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    let mut layered = LayeredConfig::with_defaults();
    if let Some(path) = &config.config_file {
        layered = layered.load_from_file(path)?;
    }
    let settings = layered.load_from_env().search_settings()?;

    tracing::info!(
        port = config.port,
        default_page_size = settings.default_page_size,
        max_page_size = settings.max_page_size,
        "Starting Civicmap API server"
    );

    // Initialize storage backend based on DATABASE_URL environment variable
    let store: SharedStore = match &config.database_url {
        Some(database_url) => {
            tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
            let store = init_postgres_storage(database_url).await.inspect_err(|_| {
                tracing::error!(
                    "Remediation:\n\
                    1. Ensure PostgreSQL is running\n\
                    2. Verify DATABASE_URL is correct\n\
                    3. Check that the database exists and is accessible"
                );
            })?;
            tracing::info!("Connected to PostgreSQL");
            store
        }
        None => {
            tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
            Arc::new(MemoryReportStore::new())
        }
    };

    let state = Arc::new(AppState::new(store, settings, Arc::new(CitizenPolicy)));

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .context("CIVICMAP_CORS_ORIGIN is not a valid header value")?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(ACTOR_HEADER),
        ]);

    let app = create_router(state).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize PostgreSQL storage from a database URL
async fn init_postgres_storage(database_url: &str) -> anyhow::Result<SharedStore> {
    let config = PostgresConfig::from_database_url(database_url).context("Invalid DATABASE_URL")?;

    let store = PostgresStore::with_migrations(config).await.context("Connection failed")?;
    Ok(Arc::new(store))
}

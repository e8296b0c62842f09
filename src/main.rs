use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnhub_api::{config, db, ml, routes, state};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    init_tracing();

    tracing::info!("Starting LearnHub API server...");

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(
        "Loaded configuration: server={}:{}",
        config.server.host,
        config.server.port
    );

    // Create database connection pool. A missing DATABASE_URL must not keep
    // the server from starting; data endpoints then fail per request while
    // health probes report the database as disconnected.
    let database_url = match config.database.url.clone() {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set - starting without a reachable database");
            "postgres://localhost:5432/learnhub".to_string()
        }
    };
    let pool = db::create_pool(&database_url, config.database.max_connections)?;

    // Apply migrations when the database answers
    match db::run_migrations(&pool).await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::warn!("Skipping migrations: {}", e),
    }

    // Initialize the ML recommendation client if configured
    let ml = match config.ml.service_url.as_deref() {
        Some(url) => {
            tracing::info!("Initializing ML recommendation client for {}", url);
            Some(ml::MlClient::new(url, config.ml.request_timeout_ms)?)
        }
        None => {
            tracing::warn!(
                "ML_SERVICE_URL not set - recommendations use the local fallback only"
            );
            None
        }
    };

    // CORS pinned to the frontend origin
    let frontend_origin = config
        .server
        .frontend_url
        .parse::<HeaderValue>()
        .context("Failed to parse FRONTEND_URL")?;
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Create app state
    let state = state::AppState::new(pool, config.clone(), ml);

    // Build router with middleware
    let app = routes::create_router(state).layer(
        ServiceBuilder::new()
            // Logging layer
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // CORS layer
            .layer(cors)
            // Compression layer
            .layer(CompressionLayer::new()),
    );

    // Start server
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/api/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnhub_api=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

//! Weather News System - Backend Server
//!
//! A small record-keeping service for weather observations: submit, list,
//! edit, delete and query temperature records through a REST API backed by
//! PostgreSQL, with a static web client served alongside.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod extract;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use services::ObservationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wns_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Weather News Server");
    tracing::info!("Environment: {}", config.environment);

    // Connect to the database, retrying with a fixed delay until it is up
    let db_pool = connect_with_retry(&config.database).await;

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Populate an empty store with the sample data set
    let seeded = ObservationService::new(db_pool.clone())
        .seed_if_empty()
        .await?;
    if seeded > 0 {
        tracing::info!("Inserted {} seed observations", seeded);
    }

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the database pool, retrying indefinitely on failure.
///
/// Fixed delay between attempts, no backoff, no cap; each attempt is
/// logged. Matches the store's connect-retry contract.
async fn connect_with_retry(config: &config::DatabaseConfig) -> sqlx::PgPool {
    let delay = Duration::from_secs(config.connect_retry_seconds);
    loop {
        tracing::info!("Connecting to database...");
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&config.url)
            .await
        {
            Ok(pool) => {
                tracing::info!("Database connection established");
                return pool;
            }
            Err(err) => {
                tracing::error!(
                    "Database connection failed: {}; retrying in {}s",
                    err,
                    delay.as_secs()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/temperature", routes::temperature_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

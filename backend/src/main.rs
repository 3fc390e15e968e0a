//! NutriScan Backend
//!
//! Meal photo analysis, calorie calendar, hydration tracking and a diet
//! coach chat, served as a JSON API.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Business logic and the Gemini clients
//! - Repositories: Meal storage (in-memory or PostgreSQL)

use anyhow::Result;
use nutriscan_backend::config::{AppConfig, StorageBackend};
use nutriscan_backend::repositories::{InMemoryMealRepository, MealRepository, PgMealRepository};
use nutriscan_backend::services::seed::{seed_hydration, seed_store};
use nutriscan_backend::services::{GeminiClient, SharedClock, SystemClock};
use nutriscan_backend::{db, routes, state::AppState};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        storage = ?config.storage.backend,
        model = %config.gemini.model,
        "Starting NutriScan Backend"
    );

    if AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let repo = create_repository(&config).await?;
    let generator = Arc::new(GeminiClient::from_config(&config.gemini));
    if config.gemini.resolve_api_key().is_none() {
        warn!("No Gemini API key configured, scans and coach replies will use fallbacks");
    }

    let clock: SharedClock = Arc::new(SystemClock);
    let state = AppState::new(config.clone(), repo, generator, clock.clone())?;

    if config.seed.enabled {
        if state.meals().count().await? == 0 {
            seed_store(state.meals(), clock.today()).await?;
        }
        seed_hydration(&mut *state.hydration.lock().await)?;
    }

    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured meal repository
async fn create_repository(config: &AppConfig) -> Result<Arc<dyn MealRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory meal storage");
            Ok(Arc::new(InMemoryMealRepository::new()))
        }
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool =
                db::create_pool(&config.storage.database_url, config.storage.max_connections)
                    .await?;
            db::run_migrations(&pool).await?;
            Ok(Arc::new(PgMealRepository::new(pool)))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "nutriscan_backend=info,tower_http=info,sqlx=warn".into()
        } else {
            "nutriscan_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.gemini.resolve_api_key().is_none() {
        errors.push("Gemini API key must be set (gemini.api_key or GEMINI_API_KEY)");
    }

    if config.storage.backend == StorageBackend::Memory {
        warn!("In-memory storage in production - meals are lost on restart");
    }

    if config.storage.database_url.contains("localhost")
        || config.storage.database_url.contains("127.0.0.1")
    {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

//! Route definitions for the NutriScan API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod analytics;
mod calendar;
mod coach;
mod health;
mod hydration;
mod meals;
mod scan;
mod session;

pub use analytics::{analytics_routes, insights_routes};
pub use calendar::calendar_routes;
pub use coach::coach_routes;
pub use hydration::hydration_routes;
pub use meals::meal_routes;
pub use scan::scan_routes;
pub use session::session_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "NutriScan API v1" }))
        .nest("/meals", meal_routes())
        .nest("/calendar", calendar_routes())
        .nest("/analytics", analytics_routes())
        .nest("/insights", insights_routes())
        .nest("/scan", scan_routes())
        .nest("/coach", coach_routes())
        .nest("/hydration", hydration_routes())
        .nest("/session", session_routes())
}

//! Hydration API routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use nutriscan_shared::{AddWaterRequest, HydrationResponse, SetWaterGoalRequest};
use tracing::info;

/// Create hydration routes
pub fn hydration_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_hydration))
        .route("/water", post(add_water))
        .route("/goal", put(set_goal))
}

/// GET /api/v1/hydration
async fn get_hydration(State(state): State<AppState>) -> Json<HydrationResponse> {
    Json(state.hydration.lock().await.summary())
}

/// POST /api/v1/hydration/water
async fn add_water(
    State(state): State<AppState>,
    Json(req): Json<AddWaterRequest>,
) -> ApiResult<Json<HydrationResponse>> {
    let mut tracker = state.hydration.lock().await;
    let slot = tracker.add_water(req.amount_ml)?;

    info!(amount_ml = req.amount_ml, ?slot, "Water logged");
    Ok(Json(tracker.summary()))
}

/// PUT /api/v1/hydration/goal
async fn set_goal(
    State(state): State<AppState>,
    Json(req): Json<SetWaterGoalRequest>,
) -> ApiResult<Json<HydrationResponse>> {
    let mut tracker = state.hydration.lock().await;
    tracker.set_goal(req.goal_ml)?;
    Ok(Json(tracker.summary()))
}

//! Scan flow API routes
//!
//! The session lock is released while the image is being analysed; the
//! scan ticket decides whether the result still applies when it returns.
//! Analysis runs on its own task, so a request that times out or is
//! dropped by the client still moves the session on to the result screen.

use crate::error::{ApiError, ApiResult};
use crate::services::ImageInput;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use nutriscan_shared::{ConfirmScanRequest, InlineImage, Meal, ScanRequest, ScanResponse, SessionSnapshot};
use tracing::{error, info};

pub fn scan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(scan))
        .route("/confirm", post(confirm))
        .route("/back", post(back))
}

/// POST /api/v1/scan
async fn scan(
    State(state): State<AppState>,
    Json(req): Json<ScanRequest>,
) -> ApiResult<Json<ScanResponse>> {
    let image = InlineImage::from_encoded(&req.image);
    if image.is_empty() {
        return Err(ApiError::Validation("Image cannot be empty".to_string()));
    }

    let ticket = state.session.lock().await.begin_scan(&image)?;

    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let outcome = task_state.analysis.analyze(ImageInput::Inline(image)).await;
        let applied = task_state
            .session
            .lock()
            .await
            .complete_scan(ticket, outcome.clone());
        (outcome, applied)
    });

    let (outcome, applied) = match task.await {
        Ok(result) => result,
        Err(e) => {
            error!(%ticket, "Scan task failed: {}", e);
            state.session.lock().await.abandon_scan(ticket);
            return Err(ApiError::Internal(anyhow::anyhow!("scan task failed: {}", e)));
        }
    };

    Ok(Json(ScanResponse {
        ticket,
        applied,
        outcome,
    }))
}

/// POST /api/v1/scan/confirm - save the analysed meal
async fn confirm(
    State(state): State<AppState>,
    body: Option<Json<ConfirmScanRequest>>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let meal_type = body.and_then(|Json(req)| req.meal_type);

    let mut session = state.session.lock().await;
    let new_meal = session.pending_meal(meal_type, state.clock.now().time())?;
    let meal = state.meals().add_meal(new_meal).await?;
    session.finish_save();

    info!(meal_id = %meal.id, "Scanned meal saved");
    Ok((StatusCode::CREATED, Json(meal)))
}

/// POST /api/v1/scan/back - abandon the current scan
async fn back(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.back();
    Json(session.snapshot())
}

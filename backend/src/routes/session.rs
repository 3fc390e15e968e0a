//! UI session API routes

use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use nutriscan_shared::{Overlay, SelectDateRequest, SelectTabRequest, SessionSnapshot};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_session))
        .route("/date", put(select_date))
        .route("/tab", put(select_tab))
        .route("/overlays/:overlay", post(open_overlay).delete(close_overlay))
}

async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// PUT /api/v1/session/date
async fn select_date(
    State(state): State<AppState>,
    Json(req): Json<SelectDateRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.select_date(req.date);
    Json(session.snapshot())
}

/// PUT /api/v1/session/tab
async fn select_tab(
    State(state): State<AppState>,
    Json(req): Json<SelectTabRequest>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.select_tab(req.tab);
    Json(session.snapshot())
}

/// POST /api/v1/session/overlays/{calendar|coach|action_sheet}
async fn open_overlay(
    State(state): State<AppState>,
    Path(overlay): Path<Overlay>,
) -> ApiResult<Json<SessionSnapshot>> {
    let mut session = state.session.lock().await;
    session.open_overlay(overlay)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/session/overlays/{overlay}
async fn close_overlay(
    State(state): State<AppState>,
    Path(overlay): Path<Overlay>,
) -> Json<SessionSnapshot> {
    let mut session = state.session.lock().await;
    session.close_overlay(overlay);
    Json(session.snapshot())
}

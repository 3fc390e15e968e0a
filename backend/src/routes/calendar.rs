//! Calendar API routes

use crate::error::{ApiError, ApiResult};
use crate::services::calendar::date_strip;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use nutriscan_shared::validation::parse_date;
use nutriscan_shared::{CalendarStripResponse, DateQuery, MonthStatsResponse, StripQuery};

pub fn calendar_routes() -> Router<AppState> {
    Router::new()
        .route("/month", get(month_stats))
        .route("/strip", get(strip))
}

/// GET /api/v1/calendar/month?date=YYYY-MM-DD
///
/// Defaults to the current month.
async fn month_stats(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<MonthStatsResponse>> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::Validation)?,
        None => state.clock.today(),
    };

    let summary = state.aggregator.month_summary(state.meals(), date).await?;
    Ok(Json(summary))
}

/// GET /api/v1/calendar/strip?today=YYYY-MM-DD
async fn strip(
    State(state): State<AppState>,
    Query(query): Query<StripQuery>,
) -> ApiResult<Json<CalendarStripResponse>> {
    let today = match query.today.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::Validation)?,
        None => state.clock.today(),
    };
    let selected_date = state.session.lock().await.selected_date();

    Ok(Json(CalendarStripResponse {
        selected_date,
        days: date_strip(today, selected_date, state.meals().date_match()),
    }))
}

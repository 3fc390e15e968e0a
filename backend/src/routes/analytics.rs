//! Analytics and insights API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use nutriscan_shared::validation::parse_date;
use nutriscan_shared::{
    AnalyticsResponse, DailyWater, InsightsResponse, StripQuery, TrendQuery, WaterToday,
};

pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/", get(analytics))
}

pub fn insights_routes() -> Router<AppState> {
    Router::new().route("/", get(insights))
}

fn resolve_today(state: &AppState, raw: Option<&str>) -> ApiResult<NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw).map_err(ApiError::Validation),
        None => Ok(state.clock.today()),
    }
}

/// GET /api/v1/analytics?range=week|month|3months&today=YYYY-MM-DD
async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> ApiResult<Json<AnalyticsResponse>> {
    let today = resolve_today(&state, query.today.as_deref())?;
    let calories = state
        .aggregator
        .calorie_trend(state.meals(), today, query.range)
        .await?;

    let water = {
        let tracker = state.hydration.lock().await;
        DailyWater {
            date: state.clock.today(),
            total_ml: tracker.current_total(),
            goal_ml: tracker.goal(),
            goal_met: tracker.goal_met(),
        }
    };

    Ok(Json(AnalyticsResponse {
        target: state.aggregator.target(),
        calories,
        water: vec![water],
    }))
}

/// GET /api/v1/insights?today=YYYY-MM-DD
async fn insights(
    State(state): State<AppState>,
    Query(query): Query<StripQuery>,
) -> ApiResult<Json<InsightsResponse>> {
    let today = resolve_today(&state, query.today.as_deref())?;
    let water = {
        let tracker = state.hydration.lock().await;
        WaterToday {
            total_ml: tracker.current_total(),
            goal_ml: tracker.goal(),
        }
    };

    let response = state.aggregator.insights(state.meals(), today, water).await?;
    Ok(Json(response))
}

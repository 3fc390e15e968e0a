//! Meal log API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use nutriscan_shared::validation::parse_date;
use nutriscan_shared::{AddMealRequest, DailyMealsResponse, DateQuery, Meal, MealGroup, NewMeal};

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meals_for_date).post(add_meal))
        .route("/grouped", get(list_grouped))
}

/// Explicit `?date=`, else the session's selected date
async fn resolve_date(state: &AppState, query: &DateQuery) -> ApiResult<NaiveDate> {
    match query.date.as_deref() {
        Some(raw) => parse_date(raw).map_err(ApiError::Validation),
        None => Ok(state.session.lock().await.selected_date()),
    }
}

/// GET /api/v1/meals?date=YYYY-MM-DD
async fn list_meals_for_date(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DailyMealsResponse>> {
    let date = resolve_date(&state, &query).await?;
    let (meals, total_calories) = state.meals().daily_log(date).await?;

    Ok(Json(DailyMealsResponse {
        date,
        total_calories,
        meals,
    }))
}

/// POST /api/v1/meals
///
/// Without a timestamp the meal is dated on the selected day at the current
/// time of day.
async fn add_meal(
    State(state): State<AppState>,
    Json(req): Json<AddMealRequest>,
) -> ApiResult<(StatusCode, Json<Meal>)> {
    let timestamp = match req.timestamp {
        Some(ts) => ts,
        None => {
            let selected = state.session.lock().await.selected_date();
            selected.and_time(state.clock.now().time())
        }
    };

    let meal = state
        .meals()
        .add_meal(NewMeal {
            meal_type: req.meal_type,
            food_name: req.food_name,
            calories: req.calories,
            image: req.image,
            timestamp,
            tags: req.tags,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals/grouped
async fn list_grouped(State(state): State<AppState>) -> ApiResult<Json<Vec<MealGroup>>> {
    Ok(Json(state.meals().meals_grouped_by_date().await?))
}

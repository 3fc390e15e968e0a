//! NutriScan WASM Module
//!
//! Browser bindings for the pure calculations in `nutriscan-shared`, so the
//! client can render the calendar, meal list and water ring without a round
//! trip. Collections cross the boundary as JSON strings.

use nutriscan_shared::day_stats::days_in_month as month_length;
use nutriscan_shared::hydration::{calculate_progress, ring_fill_percent as ring_fill};
use nutriscan_shared::validation::parse_date;
use nutriscan_shared::{
    aggregate_month, calendar_strip, calorie_trend as trend, frequent_tags as tag_counts,
    group_meals_by_date, CalorieTarget, DateMatch, DayStatus, InlineImage, Meal, TrendRange,
};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_meals(meals_json: &str) -> Result<Vec<Meal>, JsValue> {
    serde_json::from_str(meals_json).map_err(to_js_error)
}

/// Day status for a calorie total: `good`, `ok`, `bad` or `none`
#[wasm_bindgen]
pub fn classify_day(total_kcal: f64, meal_count: u32, goal_kcal: f64, tolerance_kcal: f64) -> String {
    let target = CalorieTarget::new(goal_kcal as i64, tolerance_kcal as i64);
    let status = target.classify(total_kcal.round() as i64, meal_count as usize);
    match status {
        DayStatus::Good => "good",
        DayStatus::Ok => "ok",
        DayStatus::Bad => "bad",
        DayStatus::None => "none",
    }
    .to_string()
}

/// Number of days in a month; errors unless `month` is 1-12
#[wasm_bindgen]
pub fn days_in_month(year: i32, month: u32) -> Result<u32, JsValue> {
    month_length(year, month).ok_or_else(|| to_js_error(format!("Invalid month: {}", month)))
}

/// Unclipped hydration progress in percent
#[wasm_bindgen]
pub fn hydration_progress(consumed_ml: f64, goal_ml: i32) -> f64 {
    calculate_progress(consumed_ml as i64, goal_ml)
}

/// Hydration ring fill, clipped to 0..=100
#[wasm_bindgen]
pub fn ring_fill_percent(consumed_ml: f64, goal_ml: i32) -> f64 {
    ring_fill(consumed_ml as i64, goal_ml)
}

/// Group a JSON meal array by day, newest first
#[wasm_bindgen]
pub fn group_meals(meals_json: &str) -> Result<String, JsValue> {
    let meals = parse_meals(meals_json)?;
    serde_json::to_string(&group_meals_by_date(&meals)).map_err(to_js_error)
}

/// Per-day stats for the month containing `date` (`YYYY-MM-DD`)
#[wasm_bindgen]
pub fn month_stats(meals_json: &str, date: &str, goal_kcal: f64, tolerance_kcal: f64) -> Result<String, JsValue> {
    let meals = parse_meals(meals_json)?;
    let date = parse_date(date).map_err(to_js_error)?;
    let target = CalorieTarget::new(goal_kcal as i64, tolerance_kcal as i64);
    serde_json::to_string(&aggregate_month(&meals, date, &target)).map_err(to_js_error)
}

/// Six-day date strip around `today`, marking `selected`
#[wasm_bindgen]
pub fn date_strip(today: &str, selected: &str) -> Result<String, JsValue> {
    let today = parse_date(today).map_err(to_js_error)?;
    let selected = parse_date(selected).map_err(to_js_error)?;
    serde_json::to_string(&calendar_strip(today, selected, DateMatch::ExactDay)).map_err(to_js_error)
}

/// Calorie trend for `range` (`week`, `month` or `3months`) ending on `today`
#[wasm_bindgen]
pub fn calorie_trend(
    meals_json: &str,
    today: &str,
    range: &str,
    goal_kcal: f64,
    tolerance_kcal: f64,
) -> Result<String, JsValue> {
    let meals = parse_meals(meals_json)?;
    let today = parse_date(today).map_err(to_js_error)?;
    let range: TrendRange =
        serde_json::from_value(serde_json::Value::String(range.to_string())).map_err(to_js_error)?;
    let target = CalorieTarget::new(goal_kcal as i64, tolerance_kcal as i64);
    serde_json::to_string(&trend(&meals, today, range, &target)).map_err(to_js_error)
}

/// Most frequent meal tags as a JSON array
#[wasm_bindgen]
pub fn frequent_tags(meals_json: &str, limit: usize) -> Result<String, JsValue> {
    let meals = parse_meals(meals_json)?;
    serde_json::to_string(&tag_counts(&meals, limit)).map_err(to_js_error)
}

/// Base64 payload of an image, without any data-URI prefix
#[wasm_bindgen]
pub fn image_payload(encoded: &str) -> String {
    InlineImage::from_encoded(encoded).data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_day() {
        assert_eq!(classify_day(1370.0, 3, 1950.0, 250.0), "good");
        assert_eq!(classify_day(1950.0, 2, 1950.0, 250.0), "ok");
        assert_eq!(classify_day(2500.0, 4, 1950.0, 250.0), "bad");
        assert_eq!(classify_day(0.0, 0, 1950.0, 250.0), "none");
    }

    #[test]
    fn test_ring_fill() {
        assert!((ring_fill_percent(750.0, 2500) - 30.0).abs() < 1e-9);
        assert_eq!(ring_fill_percent(5000.0, 2500), 100.0);
        assert!((hydration_progress(5000.0, 2500) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 12).unwrap(), 31);
    }

    #[test]
    fn test_group_meals_json() {
        let meals = r#"[
            {"id":"7d3c1f5e-2b4a-4c8e-9f1a-0a1b2c3d4e5f","type":"มื้อเช้า","foodName":"โยเกิร์ต",
             "calories":150,"image":"","timestamp":"2024-06-11T08:00:00","tags":[]},
            {"id":"8e4d2a6f-3c5b-4d9f-8a2b-1b2c3d4e5f60","type":"มื้อเที่ยง","foodName":"สลัด",
             "calories":350,"image":"","timestamp":"2024-06-12T12:00:00","tags":[]}
        ]"#;
        let grouped: serde_json::Value = serde_json::from_str(&group_meals(meals).unwrap()).unwrap();
        assert_eq!(grouped[0]["date"], "2024-06-12");
        assert_eq!(grouped[1]["totalCalories"], 150);
    }

    #[test]
    fn test_trend_and_tags_json() {
        let meals = r#"[
            {"id":"7d3c1f5e-2b4a-4c8e-9f1a-0a1b2c3d4e5f","type":"มื้อเช้า","foodName":"โยเกิร์ต",
             "calories":150,"image":"","timestamp":"2024-06-11T08:00:00","tags":["คลีน"]},
            {"id":"8e4d2a6f-3c5b-4d9f-8a2b-1b2c3d4e5f60","type":"มื้อเที่ยง","foodName":"สลัด",
             "calories":350,"image":"","timestamp":"2024-06-12T12:00:00","tags":["คลีน","ผักเยอะ"]}
        ]"#;
        let trend: serde_json::Value =
            serde_json::from_str(&calorie_trend(meals, "2024-06-12", "week", 1950.0, 250.0).unwrap())
                .unwrap();
        assert_eq!(trend["days"].as_array().unwrap().len(), 7);
        assert_eq!(trend["loggedDays"], 2);

        let tags: serde_json::Value = serde_json::from_str(&frequent_tags(meals, 1).unwrap()).unwrap();
        assert_eq!(tags[0]["tag"], "คลีน");
        assert_eq!(tags[0]["count"], 2);
    }

    #[test]
    fn test_image_payload() {
        assert_eq!(image_payload("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(image_payload("AAAA"), "AAAA");
    }
}

//! Integration tests for the analytics and insights endpoints

mod common;

use axum::http::StatusCode;
use common::{json, TestApp};
use serde_json::json;

fn meal_body(calories: i32, timestamp: &str, tags: &[&str]) -> String {
    json!({
        "type": "มื้อเย็น",
        "foodName": "ไก่ย่าง",
        "calories": calories,
        "timestamp": timestamp,
        "tags": tags
    })
    .to_string()
}

#[tokio::test]
async fn test_weekly_calorie_trend() {
    let app = TestApp::new();
    app.post("/api/v1/meals", &meal_body(1500, "2024-06-11T19:00:00", &[]))
        .await;
    app.post("/api/v1/meals", &meal_body(2400, "2024-06-12T19:00:00", &[]))
        .await;
    app.post("/api/v1/meals", &meal_body(900, "2024-06-01T19:00:00", &[]))
        .await;
    app.post("/api/v1/hydration/water", &json!({"amountMl": 500}).to_string())
        .await;

    let (status, body) = app.get("/api/v1/analytics").await;
    assert_eq!(status, StatusCode::OK);
    let analytics = json(&body);
    let days = analytics["calories"]["days"].as_array().unwrap();
    assert_eq!(analytics["calories"]["range"], "week");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-06-06");
    assert_eq!(days[6]["calories"], 2400);
    assert_eq!(days[6]["status"], "bad");
    assert_eq!(analytics["calories"]["averageKcal"], 1950.0);
    assert_eq!(analytics["calories"]["loggedDays"], 2);
    assert_eq!(analytics["water"][0]["totalMl"], 500);
    assert_eq!(analytics["water"][0]["date"], "2024-06-12");
}

#[tokio::test]
async fn test_trend_ranges() {
    let app = TestApp::new();

    let (_, body) = app.get("/api/v1/analytics?range=month").await;
    assert_eq!(json(&body)["calories"]["days"].as_array().unwrap().len(), 30);

    let (_, body) = app.get("/api/v1/analytics?range=3months").await;
    let analytics = json(&body);
    assert_eq!(analytics["calories"]["days"].as_array().unwrap().len(), 90);
    assert!(analytics["calories"]["averageKcal"].is_null());

    let (status, _) = app.get("/api/v1/analytics?range=year").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insights_cards_and_tags() {
    let app = TestApp::new();
    for day in 10..=12 {
        app.post(
            "/api/v1/meals",
            &meal_body(600, &format!("2024-06-{}T12:00:00", day), &["โปรตีนสูง", "หวาน"]),
        )
        .await;
        app.post(
            "/api/v1/meals",
            &meal_body(300, &format!("2024-06-{}T16:00:00", day), &["หวาน", "คลีน"]),
        )
        .await;
    }

    let (status, body) = app.get("/api/v1/insights").await;
    assert_eq!(status, StatusCode::OK);
    let insights = json(&body);
    let ids: Vec<&str> = insights["insights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sugar", "protein", "streak", "water"]);
    assert_eq!(insights["insights"][0]["type"], "warning");

    let tags = insights["frequentTags"].as_array().unwrap();
    assert_eq!(tags[0]["tag"], "หวาน");
    assert_eq!(tags[0]["count"], 6);
    assert_eq!(tags.len(), 3);
}

//! API request and response types

use crate::analytics::{CalorieTrend, TagCount, TrendRange};
use crate::day_stats::CalorieTarget;
use crate::insights::Insight;
use crate::models::{
    AnalysisOutcome, CalendarDay, ChatMessage, CoachReply, DayStat, Overlay, Screen, Tab,
    TimeSlot,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Meals
// ============================================================================

/// Manual meal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMealRequest {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub food_name: String,
    pub calories: i32,
    #[serde(default)]
    pub image: String,
    /// Defaults to the selected day at the current time
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// `?date=YYYY-MM-DD`; defaults to the selected date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    #[serde(default)]
    pub date: Option<String>,
}

/// Meals of one day with their total
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealsResponse {
    pub date: NaiveDate,
    pub total_calories: i64,
    pub meals: Vec<crate::models::Meal>,
}

// ============================================================================
// Calendar
// ============================================================================

/// Calendar grid for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStatsResponse {
    pub year: i32,
    pub month: u32,
    pub target: CalorieTarget,
    pub days: Vec<DayStat>,
}

/// `?today=YYYY-MM-DD`; defaults to the server's local date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StripQuery {
    #[serde(default)]
    pub today: Option<String>,
}

/// Horizontal date strip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarStripResponse {
    pub selected_date: NaiveDate,
    pub days: Vec<CalendarDay>,
}

// ============================================================================
// Scan
// ============================================================================

/// Captured or picked image, base64 with an optional data-URI prefix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub image: String,
}

/// Analysis result for a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub ticket: Uuid,
    /// False when the scan was abandoned before the model answered
    pub applied: bool,
    pub outcome: AnalysisOutcome,
}

/// Confirm the pending analysis into the diary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmScanRequest {
    /// Defaults to the snack label
    #[serde(default, rename = "type")]
    pub meal_type: Option<String>,
}

// ============================================================================
// Coach
// ============================================================================

/// User chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Transcript, with the reply to the last message when one was sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<CoachReply>,
}

// ============================================================================
// Hydration
// ============================================================================

/// Water intake request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWaterRequest {
    pub amount_ml: i64,
}

/// Water goal request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetWaterGoalRequest {
    pub goal_ml: i32,
}

/// Hydration dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationResponse {
    pub total_ml: i64,
    pub goal_ml: i32,
    pub progress_percent: f64,
    pub ring_fill_percent: f64,
    pub goal_met: bool,
    pub slots: Vec<TimeSlot>,
}

// ============================================================================
// Analytics & insights
// ============================================================================

/// `?range=week|month|3months&today=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub range: TrendRange,
    #[serde(default)]
    pub today: Option<String>,
}

/// One day of water intake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWater {
    pub date: NaiveDate,
    pub total_ml: i64,
    pub goal_ml: i32,
    pub goal_met: bool,
}

/// Analytics tab: calorie trend and water
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub target: CalorieTarget,
    pub calories: CalorieTrend,
    /// Only the current day is tracked
    pub water: Vec<DailyWater>,
}

/// Insights tab: cards and most eaten tags
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub frequent_tags: Vec<TagCount>,
}

// ============================================================================
// Session
// ============================================================================

/// Select a calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

/// Switch the bottom tab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectTabRequest {
    pub tab: Tab,
}

/// Read-only view of the UI session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub screen: Screen,
    pub tab: Tab,
    pub camera_open: bool,
    pub overlays: Vec<Overlay>,
    pub selected_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_ticket: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_analysis: Option<AnalysisOutcome>,
}

//! Data models for the NutriScan application

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged eating event
///
/// Meals are never mutated after creation. Only the date component of
/// `timestamp` takes part in grouping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub meal_type: String,
    pub food_name: String,
    pub calories: i32,
    /// Remote URL or inline data URI
    pub image: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Meal {
    /// Calendar day the meal was eaten on
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// A meal that has not been assigned an id yet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub meal_type: String,
    pub food_name: String,
    pub calories: i32,
    pub image: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewMeal {
    /// Assign a fresh random id
    pub fn into_meal(self) -> Meal {
        Meal {
            id: Uuid::new_v4(),
            meal_type: self.meal_type,
            food_name: self.food_name,
            calories: self.calories,
            image: self.image,
            timestamp: self.timestamp,
            tags: self.tags,
        }
    }
}

/// Macronutrients in grams
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

/// Nutrition estimate returned by the vision model for one image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub food_name: String,
    pub calories: f64,
    pub macros: Macros,
    pub ingredients: Vec<String>,
    pub suggestion: String,
    pub tags: Vec<String>,
}

/// Which path produced an [`AnalysisOutcome`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Success,
    Fallback,
}

/// Result of one scan: always carries an analysis, possibly the fallback record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub status: AnalysisStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub analysis: FoodAnalysis,
}

impl AnalysisOutcome {
    pub fn success(analysis: FoodAnalysis) -> Self {
        Self {
            status: AnalysisStatus::Success,
            fallback_reason: None,
            analysis,
        }
    }

    pub fn fallback(analysis: FoodAnalysis, reason: impl Into<String>) -> Self {
        Self {
            status: AnalysisStatus::Fallback,
            fallback_reason: Some(reason.into()),
            analysis,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        self.status == AnalysisStatus::Fallback
    }
}

/// Which path produced a [`CoachReply`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Answered,
    EmptyResponse,
    TransportError,
}

/// Coach answer, always carrying displayable text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoachReply {
    pub status: ReplyStatus,
    pub text: String,
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Coach,
}

/// One line of the coach transcript
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
        }
    }
}

/// Qualitative summary of a day's calorie total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Good,
    Ok,
    Bad,
    None,
}

/// Derived per-day summary for the calendar grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayStat {
    /// Day of month
    pub date: u32,
    pub calories: i64,
    pub status: DayStatus,
}

/// One cell of the horizontal date strip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Short weekday label
    pub day: String,
    pub date: u32,
    pub full_date: NaiveDate,
    pub is_active: bool,
}

/// How two dates are compared when filtering meals or marking the active day
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateMatch {
    /// Year, month and day must all match
    #[default]
    ExactDay,
    /// Only the day of month is compared
    DayOfMonth,
}

impl DateMatch {
    pub fn same_day(self, a: NaiveDate, b: NaiveDate) -> bool {
        match self {
            DateMatch::ExactDay => a == b,
            DateMatch::DayOfMonth => a.day() == b.day(),
        }
    }
}

/// Fixed hydration bucket identifiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Morning,
    Afternoon,
    Evening,
}

/// Time-of-day hydration bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: SlotId,
    pub label: String,
    pub period: String,
    /// Target in ml
    pub target: i32,
    /// Consumed so far in ml
    pub current: i64,
    pub icon: String,
    pub color: String,
}

/// Top-level screen of the scan flow
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Main,
    Scanning,
    Result,
}

/// Bottom navigation tab
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Home,
    Analytics,
    Insights,
    Profile,
    Hydration,
}

/// Modal layered on top of the main screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Calendar,
    Coach,
    ActionSheet,
}

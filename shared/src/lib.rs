//! NutriScan Shared Library
//!
//! This crate contains shared types, models, and the pure calculations
//! (meal grouping, day status, calendar strip, hydration progress, trends
//! and insights) used by the backend and the WASM module.

pub mod analytics;
pub mod calendar;
pub mod day_stats;
pub mod errors;
pub mod hydration;
pub mod image;
pub mod insights;
pub mod meal_log;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use analytics::{calorie_trend, frequent_tags, CalorieTrend, TagCount, TrendRange};
pub use calendar::calendar_strip;
pub use day_stats::{aggregate_month, CalorieTarget};
pub use errors::*;
pub use image::InlineImage;
pub use insights::{derive_insights, Insight, InsightKind, WaterToday};
pub use meal_log::{group_meals_by_date, meals_for_date, MealGroup};
pub use models::*;
pub use types::*;

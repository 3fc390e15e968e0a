//! Input validation functions
//!
//! This module provides validation utilities for user input.

use crate::errors::{HydrationError, InvalidMealError};
use crate::models::NewMeal;
use chrono::NaiveDate;

/// Longest chat message accepted for the coach
pub const MAX_CHAT_MESSAGE_CHARS: usize = 2000;

/// Longest food name accepted for a meal
pub const MAX_FOOD_NAME_CHARS: usize = 200;

/// Upper bound for a daily water goal in ml
pub const MAX_WATER_GOAL_ML: i32 = 20000;

/// Validate calorie value
pub fn validate_calories(calories: i32) -> Result<(), String> {
    if calories < 0 {
        return Err("Calories cannot be negative".to_string());
    }
    Ok(())
}

/// Validate food name
pub fn validate_food_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Food name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_FOOD_NAME_CHARS {
        return Err("Food name too long".to_string());
    }
    Ok(())
}

/// Validate a meal before it enters the store
///
/// Negative calories are rejected, never clamped.
pub fn validate_meal(meal: &NewMeal) -> Result<(), InvalidMealError> {
    validate_calories(meal.calories).map_err(|e| InvalidMealError::new("calories", e))?;
    validate_food_name(&meal.food_name).map_err(|e| InvalidMealError::new("foodName", e))?;
    Ok(())
}

/// Validate a single water intake amount
pub fn validate_water_amount(amount_ml: i64) -> Result<(), HydrationError> {
    if amount_ml < 0 {
        return Err(HydrationError::NegativeAmount(amount_ml));
    }
    Ok(())
}

/// Validate a daily water goal
pub fn validate_water_goal(goal_ml: i32) -> Result<(), HydrationError> {
    if goal_ml <= 0 || goal_ml > MAX_WATER_GOAL_ML {
        return Err(HydrationError::InvalidGoal(goal_ml));
    }
    Ok(())
}

/// Validate a chat message for the coach
pub fn validate_chat_message(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Message cannot be empty".to_string());
    }
    if text.chars().count() > MAX_CHAT_MESSAGE_CHARS {
        return Err(format!(
            "Message too long (max {} characters)",
            MAX_CHAT_MESSAGE_CHARS
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())
}

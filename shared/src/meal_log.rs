//! Meal filtering and grouping for the home feed and the list view

use crate::models::{DateMatch, Meal};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meals that share one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealGroup {
    pub date: NaiveDate,
    pub total_calories: i64,
    pub meals: Vec<Meal>,
}

/// Sum of calories over a slice of meals
pub fn total_calories(meals: &[Meal]) -> i64 {
    meals.iter().map(|m| i64::from(m.calories)).sum()
}

/// Meals eaten on `date`, in store order
pub fn meals_for_date(meals: &[Meal], date: NaiveDate, matching: DateMatch) -> Vec<Meal> {
    meals
        .iter()
        .filter(|m| matching.same_day(m.date(), date))
        .cloned()
        .collect()
}

/// Group meals by calendar day, newest day first
///
/// Within a group meals keep their store order. Every meal lands in
/// exactly one group.
pub fn group_meals_by_date(meals: &[Meal]) -> Vec<MealGroup> {
    let mut groups: BTreeMap<NaiveDate, Vec<Meal>> = BTreeMap::new();
    for meal in meals {
        groups.entry(meal.date()).or_default().push(meal.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, meals)| MealGroup {
            date,
            total_calories: total_calories(&meals),
            meals,
        })
        .collect()
}

//! Calorie trends and tag frequencies for the analytics and insights tabs

use crate::day_stats::CalorieTarget;
use crate::meal_log::total_calories;
use crate::models::{DayStatus, Meal};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Window shown by the trend chart
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrendRange {
    #[default]
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
}

impl TrendRange {
    /// Number of days covered, ending on (and including) today
    pub fn days(self) -> i64 {
        match self {
            TrendRange::Week => 7,
            TrendRange::Month => 30,
            TrendRange::ThreeMonths => 90,
        }
    }
}

/// One point of the calorie trend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyCalories {
    pub date: NaiveDate,
    pub calories: i64,
    pub meal_count: usize,
    pub status: DayStatus,
}

/// Calorie series with its headline numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTrend {
    pub range: TrendRange,
    /// Oldest first
    pub days: Vec<DailyCalories>,
    /// Mean over days with at least one meal
    pub average_kcal: Option<f64>,
    /// `(average - goal) / goal` in percent
    pub percent_vs_goal: Option<f64>,
    pub logged_days: usize,
    pub days_on_target: usize,
}

/// How often a tag was attached to a meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Per-day calorie totals for the `range` days ending on `today`
pub fn daily_calories(
    meals: &[Meal],
    today: NaiveDate,
    range: TrendRange,
    target: &CalorieTarget,
) -> Vec<DailyCalories> {
    let start = today - Duration::days(range.days() - 1);

    let mut per_day: BTreeMap<NaiveDate, Vec<Meal>> = BTreeMap::new();
    for meal in meals {
        let date = meal.date();
        if date >= start && date <= today {
            per_day.entry(date).or_default().push(meal.clone());
        }
    }

    start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|date| {
            let day_meals = per_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            let calories = total_calories(day_meals);
            DailyCalories {
                date,
                calories,
                meal_count: day_meals.len(),
                status: target.classify(calories, day_meals.len()),
            }
        })
        .collect()
}

/// Calorie series plus average, deviation from goal and on-target days
pub fn calorie_trend(
    meals: &[Meal],
    today: NaiveDate,
    range: TrendRange,
    target: &CalorieTarget,
) -> CalorieTrend {
    let days = daily_calories(meals, today, range, target);

    let logged: Vec<&DailyCalories> = days.iter().filter(|d| d.meal_count > 0).collect();
    let average_kcal = if logged.is_empty() {
        None
    } else {
        Some(logged.iter().map(|d| d.calories as f64).sum::<f64>() / logged.len() as f64)
    };
    let percent_vs_goal = match average_kcal {
        Some(avg) if target.goal_kcal > 0 => {
            Some((avg - target.goal_kcal as f64) / target.goal_kcal as f64 * 100.0)
        }
        _ => None,
    };

    CalorieTrend {
        range,
        logged_days: logged.len(),
        days_on_target: days.iter().filter(|d| d.status == DayStatus::Good).count(),
        average_kcal,
        percent_vs_goal,
        days,
    }
}

/// Most common meal tags, most frequent first
///
/// Ties are broken alphabetically. Blank tags are skipped.
pub fn frequent_tags(meals: &[Meal], limit: usize) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in meals.iter().flat_map(|m| m.tags.iter()) {
        let tag = tag.trim();
        if !tag.is_empty() {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags.truncate(limit);
    tags
}

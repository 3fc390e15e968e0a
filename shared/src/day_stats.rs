//! Per-day calorie summaries for the calendar grid
//!
//! Everything here is a pure function of its inputs; the aggregate is
//! recomputed on every request rather than cached.

use crate::models::{DayStat, DayStatus, Meal};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default daily calorie goal in kcal
pub const DEFAULT_CALORIE_GOAL_KCAL: i64 = 1950;

/// Default tolerance around the goal in kcal
pub const DEFAULT_CALORIE_TOLERANCE_KCAL: i64 = 250;

/// Calorie band a day is judged against
///
/// The defaults give good < 1700 kcal, bad > 2200 kcal, ok in between.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTarget {
    pub goal_kcal: i64,
    pub tolerance_kcal: i64,
}

impl Default for CalorieTarget {
    fn default() -> Self {
        Self {
            goal_kcal: DEFAULT_CALORIE_GOAL_KCAL,
            tolerance_kcal: DEFAULT_CALORIE_TOLERANCE_KCAL,
        }
    }
}

impl CalorieTarget {
    pub fn new(goal_kcal: i64, tolerance_kcal: i64) -> Self {
        Self {
            goal_kcal,
            tolerance_kcal: tolerance_kcal.abs(),
        }
    }

    #[inline]
    pub fn lower_bound(&self) -> i64 {
        self.goal_kcal - self.tolerance_kcal
    }

    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.goal_kcal + self.tolerance_kcal
    }

    /// Bucket a day's total
    pub fn classify(&self, total_kcal: i64, meal_count: usize) -> DayStatus {
        if meal_count == 0 {
            return DayStatus::None;
        }
        if total_kcal < self.lower_bound() {
            DayStatus::Good
        } else if total_kcal > self.upper_bound() {
            DayStatus::Bad
        } else {
            DayStatus::Ok
        }
    }
}

/// Number of days in a month; `None` unless `month` is 1-12
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Summarise every day of the month containing `evaluation_date`
///
/// Days without meals are reported with `calories = 0` and
/// `status = none`.
pub fn aggregate_month(
    meals: &[Meal],
    evaluation_date: NaiveDate,
    target: &CalorieTarget,
) -> Vec<DayStat> {
    let (year, month) = (evaluation_date.year(), evaluation_date.month());

    let mut per_day: HashMap<u32, (i64, usize)> = HashMap::new();
    for meal in meals {
        let date = meal.date();
        if date.year() == year && date.month() == month {
            let entry = per_day.entry(date.day()).or_insert((0, 0));
            entry.0 += i64::from(meal.calories);
            entry.1 += 1;
        }
    }

    let first = evaluation_date.with_day(1).unwrap_or(evaluation_date);
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|d| {
            let day = d.day();
            let (calories, count) = per_day.get(&day).copied().unwrap_or((0, 0));
            DayStat {
                date: day,
                calories,
                status: target.classify(calories, count),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewMeal;
    use proptest::prelude::*;
    use rstest::rstest;

    fn meal_on(date: NaiveDate, calories: i32) -> Meal {
        NewMeal {
            meal_type: "มื้อเย็น".to_string(),
            food_name: "แซลมอนย่าง".to_string(),
            calories,
            image: String::new(),
            timestamp: date.and_hms_opt(19, 0, 0).unwrap(),
            tags: vec![],
        }
        .into_meal()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(1370, DayStatus::Good)]
    #[case(1699, DayStatus::Good)]
    #[case(1700, DayStatus::Ok)]
    #[case(1800, DayStatus::Ok)]
    #[case(2000, DayStatus::Ok)]
    #[case(2200, DayStatus::Ok)]
    #[case(2201, DayStatus::Bad)]
    #[case(2700, DayStatus::Bad)]
    fn test_default_target_buckets(#[case] total: i64, #[case] expected: DayStatus) {
        assert_eq!(CalorieTarget::default().classify(total, 1), expected);
    }

    #[test]
    fn test_no_meals_is_none_even_at_zero() {
        assert_eq!(CalorieTarget::default().classify(0, 0), DayStatus::None);
        assert_eq!(CalorieTarget::default().classify(0, 1), DayStatus::Good);
    }

    #[test]
    fn test_three_meals_same_day_is_good() {
        let day = ymd(2024, 6, 12);
        let meals = vec![meal_on(day, 320), meal_on(day, 450), meal_on(day, 600)];

        let stats = aggregate_month(&meals, day, &CalorieTarget::default());
        let stat = &stats[11];
        assert_eq!(stat.date, 12);
        assert_eq!(stat.calories, 1370);
        assert_eq!(stat.status, DayStatus::Good);
    }

    #[test]
    fn test_aggregate_covers_whole_month_and_ignores_other_months() {
        let meals = vec![meal_on(ymd(2024, 2, 10), 500), meal_on(ymd(2024, 3, 10), 2500)];
        let stats = aggregate_month(&meals, ymd(2024, 2, 1), &CalorieTarget::default());

        assert_eq!(stats.len(), 29);
        assert_eq!(stats[9].calories, 500);
        assert_eq!(stats[9].status, DayStatus::Good);
        assert!(stats
            .iter()
            .filter(|s| s.date != 10)
            .all(|s| s.status == DayStatus::None && s.calories == 0));
    }

    #[rstest]
    #[case(2023, 2, 28)]
    #[case(2024, 2, 29)]
    #[case(2024, 4, 30)]
    #[case(2024, 12, 31)]
    fn test_days_in_month(#[case] year: i32, #[case] month: u32, #[case] expected: u32) {
        assert_eq!(days_in_month(year, month), Some(expected));
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    #[case(u32::MAX)]
    fn test_days_in_month_rejects_bad_month(#[case] month: u32) {
        assert_eq!(days_in_month(2024, month), None);
    }

    #[test]
    fn test_custom_target() {
        let target = CalorieTarget::new(1800, -100);
        assert_eq!(target.tolerance_kcal, 100);
        assert_eq!(target.classify(1650, 2), DayStatus::Good);
        assert_eq!(target.classify(1850, 2), DayStatus::Ok);
        assert_eq!(target.classify(1950, 2), DayStatus::Bad);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_aggregation_is_pure(
            entries in prop::collection::vec((1u32..=30, 0i32..1200), 0..40)
        ) {
            let meals: Vec<Meal> = entries
                .iter()
                .map(|(day, cal)| meal_on(ymd(2024, 6, *day), *cal))
                .collect();
            let eval = ymd(2024, 6, 15);
            let target = CalorieTarget::default();

            let first = aggregate_month(&meals, eval, &target);
            let second = aggregate_month(&meals, eval, &target);
            prop_assert_eq!(&first, &second);

            let total: i64 = first.iter().map(|s| s.calories).sum();
            let expected: i64 = entries.iter().map(|(_, c)| i64::from(*c)).sum();
            prop_assert_eq!(total, expected);
        }
    }
}

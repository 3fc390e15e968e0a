//! Calendar summaries, trends and insights derived from the meal store

use crate::error::ApiError;
use crate::services::meals::MealStore;
use chrono::{Datelike, NaiveDate};
use nutriscan_shared::{
    aggregate_month, calendar_strip, calorie_trend, derive_insights, frequent_tags, CalendarDay,
    CalorieTarget, CalorieTrend, DateMatch, DayStat, InsightsResponse, MonthStatsResponse,
    TrendRange, WaterToday,
};

/// Tags shown under "frequently eaten"
pub const FREQUENT_TAG_LIMIT: usize = 6;

/// Per-day calorie status for a month
#[derive(Debug, Clone, Copy)]
pub struct DayAggregator {
    target: CalorieTarget,
}

impl DayAggregator {
    pub fn new(target: CalorieTarget) -> Self {
        Self { target }
    }

    #[inline]
    pub fn target(&self) -> CalorieTarget {
        self.target
    }

    /// One [`DayStat`] for every day of `evaluation_date`'s month
    pub async fn month_stats(
        &self,
        store: &MealStore,
        evaluation_date: NaiveDate,
    ) -> Result<Vec<DayStat>, ApiError> {
        let meals = store.all_meals().await?;
        Ok(aggregate_month(&meals, evaluation_date, &self.target))
    }

    pub async fn month_summary(
        &self,
        store: &MealStore,
        evaluation_date: NaiveDate,
    ) -> Result<MonthStatsResponse, ApiError> {
        let days = self.month_stats(store, evaluation_date).await?;
        Ok(MonthStatsResponse {
            year: evaluation_date.year(),
            month: evaluation_date.month(),
            target: self.target,
            days,
        })
    }

    /// Calorie series for the `range` days ending on `today`
    pub async fn calorie_trend(
        &self,
        store: &MealStore,
        today: NaiveDate,
        range: TrendRange,
    ) -> Result<CalorieTrend, ApiError> {
        let meals = store.all_meals().await?;
        Ok(calorie_trend(&meals, today, range, &self.target))
    }

    pub async fn insights(
        &self,
        store: &MealStore,
        today: NaiveDate,
        water: WaterToday,
    ) -> Result<InsightsResponse, ApiError> {
        let meals = store.all_meals().await?;
        Ok(InsightsResponse {
            insights: derive_insights(&meals, today, &self.target, water),
            frequent_tags: frequent_tags(&meals, FREQUENT_TAG_LIMIT),
        })
    }
}

/// Six-day strip around `today` with `selected` marked active
///
/// Thin wrapper so routes pass the store's [`DateMatch`].
pub fn date_strip(today: NaiveDate, selected: NaiveDate, matching: DateMatch) -> Vec<CalendarDay> {
    calendar_strip(today, selected, matching)
}

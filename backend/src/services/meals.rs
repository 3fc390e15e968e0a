//! Meal store - the single collection of logged meals

use crate::error::ApiError;
use crate::repositories::MealRepository;
use chrono::NaiveDate;
use nutriscan_shared::meal_log::total_calories;
use nutriscan_shared::validation::validate_meal;
use nutriscan_shared::{group_meals_by_date, meals_for_date, DateMatch, Meal, MealGroup, NewMeal};
use std::sync::Arc;
use tracing::{info, instrument};

/// Logged meals, newest insertion first
#[derive(Clone)]
pub struct MealStore {
    repo: Arc<dyn MealRepository>,
    date_match: DateMatch,
}

impl MealStore {
    pub fn new(repo: Arc<dyn MealRepository>, date_match: DateMatch) -> Self {
        Self { repo, date_match }
    }

    #[inline]
    pub fn date_match(&self) -> DateMatch {
        self.date_match
    }

    /// Validate and prepend a meal
    #[instrument(skip(self, meal), fields(food = %meal.food_name, calories = meal.calories))]
    pub async fn add_meal(&self, meal: NewMeal) -> Result<Meal, ApiError> {
        validate_meal(&meal)?;

        let meal = meal.into_meal();
        self.repo.insert(&meal).await.map_err(ApiError::Internal)?;

        info!(meal_id = %meal.id, "Meal logged");
        Ok(meal)
    }

    pub async fn all_meals(&self) -> Result<Vec<Meal>, ApiError> {
        self.repo.list().await.map_err(ApiError::Internal)
    }

    /// Meals eaten on `date`, in store order
    pub async fn meals_for_date(&self, date: NaiveDate) -> Result<Vec<Meal>, ApiError> {
        let meals = self.all_meals().await?;
        Ok(meals_for_date(&meals, date, self.date_match))
    }

    /// Meals and calorie total for one day
    pub async fn daily_log(&self, date: NaiveDate) -> Result<(Vec<Meal>, i64), ApiError> {
        let meals = self.meals_for_date(date).await?;
        let total = total_calories(&meals);
        Ok((meals, total))
    }

    /// Day groups, newest day first
    pub async fn meals_grouped_by_date(&self) -> Result<Vec<MealGroup>, ApiError> {
        let meals = self.all_meals().await?;
        Ok(group_meals_by_date(&meals))
    }

    pub async fn count(&self) -> Result<usize, ApiError> {
        self.repo.count().await.map_err(ApiError::Internal)
    }

    pub async fn health_check(&self) -> Result<(), ApiError> {
        self.repo.health_check().await.map_err(ApiError::Internal)
    }
}

//! Data repositories
//!
//! Provides the storage layer for logged meals.

pub mod meals;

pub use meals::{InMemoryMealRepository, MealRepository, PgMealRepository};

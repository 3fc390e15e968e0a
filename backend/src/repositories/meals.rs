//! Meal repository - storage for logged meals
//!
//! The store only ever prepends and lists, so both implementations keep the
//! collection in insertion order, newest first.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use nutriscan_shared::Meal;
use sqlx::PgPool;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Storage seam for the meal collection
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Store a meal at the front of the collection
    async fn insert(&self, meal: &Meal) -> Result<()>;

    /// All meals, most recently inserted first
    async fn list(&self) -> Result<Vec<Meal>>;

    /// Number of stored meals
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }

    /// Check the backing store is reachable
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Process-local meal storage, reset on restart
#[derive(Debug, Default)]
pub struct InMemoryMealRepository {
    meals: RwLock<VecDeque<Meal>>,
}

impl InMemoryMealRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<()> {
        self.meals.write().await.push_front(meal.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Meal>> {
        Ok(self.meals.read().await.iter().cloned().collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.meals.read().await.len())
    }
}

// ============================================================================
// PostgreSQL
// ============================================================================

/// Meal row from the database
#[derive(Debug, Clone, sqlx::FromRow)]
struct MealRecord {
    id: Uuid,
    meal_type: String,
    food_name: String,
    calories: i32,
    image: String,
    eaten_at: NaiveDateTime,
    tags: Vec<String>,
}

impl From<MealRecord> for Meal {
    fn from(record: MealRecord) -> Self {
        Meal {
            id: record.id,
            meal_type: record.meal_type,
            food_name: record.food_name,
            calories: record.calories,
            image: record.image,
            timestamp: record.eaten_at,
            tags: record.tags,
        }
    }
}

/// Durable meal storage
#[derive(Debug, Clone)]
pub struct PgMealRepository {
    pool: PgPool,
}

impl PgMealRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealRepository for PgMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, meal_type, food_name, calories, image, eaten_at, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(meal.id)
        .bind(&meal.meal_type)
        .bind(&meal.food_name)
        .bind(meal.calories)
        .bind(&meal.image)
        .bind(meal.timestamp)
        .bind(&meal.tags)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Meal>> {
        let records = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, meal_type, food_name, calories, image, eaten_at, tags
            FROM meals
            ORDER BY seq DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Meal::from).collect())
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meals")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count)?)
    }

    async fn health_check(&self) -> Result<()> {
        crate::db::health_check(&self.pool).await
    }
}

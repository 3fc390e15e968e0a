//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Mutable per-user state (screen session, hydration, coach transcript)
//! sits behind `tokio::sync::Mutex`. Handlers hold a lock only while
//! mutating, never across a model call.

use crate::config::{AppConfig, RoutingMode};
use crate::repositories::MealRepository;
use crate::services::{
    AnalysisClient, CoachClient, CoachConversation, ContentGenerator, DayAggregator,
    HydrationTracker, MealStore, SharedClock, SlotRouting, UiSession,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
///
/// All fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub meals: MealStore,
    pub aggregator: DayAggregator,
    pub analysis: AnalysisClient,
    pub coach: CoachClient,
    pub clock: SharedClock,
    pub session: Arc<Mutex<UiSession>>,
    pub hydration: Arc<Mutex<HydrationTracker>>,
    pub conversation: Arc<Mutex<CoachConversation>>,
}

impl AppState {
    /// Wire services from configuration
    ///
    /// Fails if the configured water goal is out of range.
    pub fn new(
        config: AppConfig,
        repo: Arc<dyn MealRepository>,
        generator: Arc<dyn ContentGenerator>,
        clock: SharedClock,
    ) -> Result<Self> {
        let routing = match config.hydration.routing {
            RoutingMode::Fixed => SlotRouting::Fixed(config.hydration.fixed_slot),
            RoutingMode::Clock => SlotRouting::Clock(clock.clone()),
        };
        let hydration = HydrationTracker::new(config.hydration.daily_goal_ml, routing)?;
        let session = UiSession::new(clock.today());

        Ok(Self {
            meals: MealStore::new(repo, config.nutrition.date_match),
            aggregator: DayAggregator::new(config.nutrition.calorie_target()),
            analysis: AnalysisClient::new(generator.clone()),
            coach: CoachClient::new(generator),
            clock,
            session: Arc::new(Mutex::new(session)),
            hydration: Arc::new(Mutex::new(hydration)),
            conversation: Arc::new(Mutex::new(CoachConversation::new())),
            config: Arc::new(config),
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn meals(&self) -> &MealStore {
        &self.meals
    }
}

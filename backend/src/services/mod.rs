//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod analysis;
pub mod calendar;
pub mod camera;
pub mod clock;
pub mod coach;
pub mod gemini;
pub mod hydration;
pub mod meals;
pub mod seed;
pub mod session;

pub use analysis::{AnalysisClient, ImageInput};
pub use calendar::DayAggregator;
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use coach::{CoachClient, CoachConversation};
pub use gemini::{ContentGenerator, GeminiClient, GeminiError};
pub use hydration::{HydrationTracker, SlotRouting};
pub use meals::MealStore;
pub use session::UiSession;

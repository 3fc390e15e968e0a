//! Error types for the NutriScan application

use crate::models::Screen;
use thiserror::Error;

/// A meal was rejected before insertion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid meal ({field}): {reason}")]
pub struct InvalidMealError {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidMealError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Hydration input errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HydrationError {
    #[error("Water amount cannot be negative (got {0} ml)")]
    NegativeAmount(i64),

    #[error("Daily goal must be between 1 and 20000 ml (got {0} ml)")]
    InvalidGoal(i32),

    #[error("Adding {0} ml would overflow the daily total")]
    TotalOverflow(i64),
}

/// Screen state machine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("A scan is already in progress")]
    ScanInProgress,

    #[error("Cannot {action} while on the {screen:?} screen")]
    InvalidTransition {
        action: &'static str,
        screen: Screen,
    },

    #[error("No analysis is waiting for confirmation")]
    NoPendingAnalysis,
}

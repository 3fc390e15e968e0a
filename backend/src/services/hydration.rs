//! Hydration tracking service
//!
//! Keeps the day's water total, its split across the three time slots and
//! the daily goal. Added water is routed to a slot either by a fixed choice
//! or by the local clock.

use crate::services::clock::SharedClock;
use nutriscan_shared::hydration::{
    calculate_progress, default_time_slots, is_goal_met, ring_fill_percent,
};
use nutriscan_shared::validation::{validate_water_amount, validate_water_goal};
use nutriscan_shared::{HydrationError, HydrationResponse, SlotId, TimeSlot};
use std::fmt;
use tracing::debug;

/// How [`HydrationTracker::add_water`] picks a slot
#[derive(Clone)]
pub enum SlotRouting {
    Fixed(SlotId),
    Clock(SharedClock),
}

impl Default for SlotRouting {
    fn default() -> Self {
        SlotRouting::Fixed(SlotId::Afternoon)
    }
}

impl fmt::Debug for SlotRouting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRouting::Fixed(slot) => f.debug_tuple("Fixed").field(slot).finish(),
            SlotRouting::Clock(_) => f.write_str("Clock"),
        }
    }
}

impl SlotRouting {
    fn resolve(&self) -> SlotId {
        match self {
            SlotRouting::Fixed(slot) => *slot,
            SlotRouting::Clock(clock) => SlotId::for_time(clock.now().time()),
        }
    }
}

/// Daily water intake state
///
/// `total_ml` always equals the sum of the slots' `current` values.
#[derive(Debug, Clone)]
pub struct HydrationTracker {
    goal_ml: i32,
    total_ml: i64,
    slots: Vec<TimeSlot>,
    routing: SlotRouting,
}

impl HydrationTracker {
    pub fn new(goal_ml: i32, routing: SlotRouting) -> Result<Self, HydrationError> {
        validate_water_goal(goal_ml)?;
        Ok(Self {
            goal_ml,
            total_ml: 0,
            slots: default_time_slots(),
            routing,
        })
    }

    /// Add water to the slot chosen by the routing policy
    pub fn add_water(&mut self, amount_ml: i64) -> Result<SlotId, HydrationError> {
        let slot = self.routing.resolve();
        self.add_water_to(slot, amount_ml)?;
        Ok(slot)
    }

    /// Add water to a specific slot
    pub fn add_water_to(&mut self, slot: SlotId, amount_ml: i64) -> Result<(), HydrationError> {
        validate_water_amount(amount_ml)?;

        // Slot values never exceed the total, so checking the total covers them.
        let total_ml = self
            .total_ml
            .checked_add(amount_ml)
            .ok_or(HydrationError::TotalOverflow(amount_ml))?;
        if let Some(entry) = self.slots.iter_mut().find(|s| s.id == slot) {
            entry.current += amount_ml;
        }
        self.total_ml = total_ml;

        debug!(?slot, amount_ml, total_ml = self.total_ml, "Water added");
        Ok(())
    }

    pub fn set_goal(&mut self, goal_ml: i32) -> Result<(), HydrationError> {
        validate_water_goal(goal_ml)?;
        self.goal_ml = goal_ml;
        Ok(())
    }

    #[inline]
    pub fn current_total(&self) -> i64 {
        self.total_ml
    }

    #[inline]
    pub fn goal(&self) -> i32 {
        self.goal_ml
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Unclipped progress towards the goal
    pub fn progress_percent(&self) -> f64 {
        calculate_progress(self.total_ml, self.goal_ml)
    }

    /// Progress clipped to 0..=100
    pub fn ring_fill_percent(&self) -> f64 {
        ring_fill_percent(self.total_ml, self.goal_ml)
    }

    pub fn goal_met(&self) -> bool {
        is_goal_met(self.total_ml, self.goal_ml)
    }

    pub fn summary(&self) -> HydrationResponse {
        HydrationResponse {
            total_ml: self.total_ml,
            goal_ml: self.goal_ml,
            progress_percent: self.progress_percent(),
            ring_fill_percent: self.ring_fill_percent(),
            goal_met: self.goal_met(),
            slots: self.slots.clone(),
        }
    }
}

/// Build a clock-routed tracker
pub fn clock_routed(goal_ml: i32, clock: SharedClock) -> Result<HydrationTracker, HydrationError> {
    HydrationTracker::new(goal_ml, SlotRouting::Clock(clock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn tracker() -> HydrationTracker {
        HydrationTracker::new(2500, SlotRouting::default()).unwrap()
    }

    #[test]
    fn test_new_tracker_is_empty() {
        let t = tracker();
        assert_eq!(t.current_total(), 0);
        assert_eq!(t.goal(), 2500);
        assert_eq!(t.slots().len(), 3);
        assert!(t.slots().iter().all(|s| s.current == 0));
    }

    #[test]
    fn test_add_water_updates_total_and_afternoon() {
        let mut t = tracker();
        t.add_water(250).unwrap();
        t.add_water(500).unwrap();

        assert_eq!(t.current_total(), 750);
        assert_eq!(t.slot(SlotId::Afternoon).unwrap().current, 750);
        assert_eq!(t.slot(SlotId::Morning).unwrap().current, 0);
        assert!((t.progress_percent() - 30.0).abs() < 1e-9);
        assert!(!t.goal_met());
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        let mut t = tracker();
        t.add_water(0).unwrap();
        assert_eq!(t.current_total(), 0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut t = tracker();
        assert_eq!(t.add_water(-1), Err(HydrationError::NegativeAmount(-1)));
        assert_eq!(t.current_total(), 0);
    }

    #[test]
    fn test_overflowing_addition_rejected() {
        let mut t = tracker();
        t.add_water(i64::MAX).unwrap();

        assert_eq!(t.add_water(1), Err(HydrationError::TotalOverflow(1)));
        assert_eq!(t.current_total(), i64::MAX);
        assert_eq!(t.slot(SlotId::Afternoon).unwrap().current, i64::MAX);
    }

    #[test]
    fn test_goal_validation() {
        assert!(HydrationTracker::new(0, SlotRouting::default()).is_err());
        let mut t = tracker();
        assert!(t.set_goal(-100).is_err());
        t.set_goal(3000).unwrap();
        assert_eq!(t.goal(), 3000);
    }

    #[test]
    fn test_progress_beyond_goal() {
        let mut t = tracker();
        t.add_water(3000).unwrap();
        assert!(t.goal_met());
        assert!((t.progress_percent() - 120.0).abs() < 1e-9);
        assert_eq!(t.ring_fill_percent(), 100.0);
    }

    #[test]
    fn test_clock_routing() {
        let at = |h: u32| {
            let clock = FixedClock(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(h, 30, 0)
                    .unwrap(),
            );
            clock_routed(2500, Arc::new(clock)).unwrap()
        };

        assert_eq!(at(7).add_water(100).unwrap(), SlotId::Morning);
        assert_eq!(at(12).add_water(100).unwrap(), SlotId::Afternoon);
        assert_eq!(at(19).add_water(100).unwrap(), SlotId::Evening);
        assert_eq!(at(3).add_water(100).unwrap(), SlotId::Morning);
        assert_eq!(at(23).add_water(100).unwrap(), SlotId::Evening);
    }

    #[test]
    fn test_summary_matches_accessors() {
        let mut t = tracker();
        t.add_water_to(SlotId::Morning, 800).unwrap();
        let summary = t.summary();
        assert_eq!(summary.total_ml, 800);
        assert_eq!(summary.goal_ml, 2500);
        assert_eq!(summary.slots[0].current, 800);
        assert!((summary.ring_fill_percent - 32.0).abs() < 1e-9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_additions_accumulate(a in 0i64..5000, b in 0i64..5000) {
            let mut t = tracker();
            t.add_water(a).unwrap();
            t.add_water(b).unwrap();
            prop_assert_eq!(t.current_total(), a + b);
            prop_assert_eq!(t.slot(SlotId::Afternoon).unwrap().current, a + b);
        }

        #[test]
        fn prop_total_equals_slot_sum(amounts in prop::collection::vec((0usize..3, 0i64..2000), 0..20)) {
            let mut t = tracker();
            for (slot, amount) in amounts {
                t.add_water_to(SlotId::ALL[slot], amount).unwrap();
            }
            let sum: i64 = t.slots().iter().map(|s| s.current).sum();
            prop_assert_eq!(t.current_total(), sum);
            prop_assert!((0.0..=100.0).contains(&t.ring_fill_percent()));
        }
    }
}

//! Hydration slot catalogue and progress calculations

use crate::models::{SlotId, TimeSlot};
use chrono::{NaiveTime, Timelike};

/// Default daily water goal in ml
pub const DEFAULT_WATER_GOAL_ML: i32 = 2500;

impl SlotId {
    /// All slots in display order
    pub const ALL: [SlotId; 3] = [SlotId::Morning, SlotId::Afternoon, SlotId::Evening];

    /// Start and end hour of the slot's window, end exclusive
    pub fn window_hours(self) -> (u32, u32) {
        match self {
            SlotId::Morning => (6, 11),
            SlotId::Afternoon => (11, 17),
            SlotId::Evening => (17, 22),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotId::Morning => "เช้า",
            SlotId::Afternoon => "บ่าย",
            SlotId::Evening => "เย็น",
        }
    }

    /// Fixed target in ml
    pub fn target_ml(self) -> i32 {
        match self {
            SlotId::Morning => 1000,
            SlotId::Afternoon => 1000,
            SlotId::Evening => 500,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SlotId::Morning => "🌅",
            SlotId::Afternoon => "☀️",
            SlotId::Evening => "🌙",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SlotId::Morning => "bg-orange-50 text-orange-500",
            SlotId::Afternoon => "bg-yellow-50 text-yellow-500",
            SlotId::Evening => "bg-indigo-50 text-indigo-500",
        }
    }

    /// Display period, e.g. `06:00 - 11:00`
    pub fn period(self) -> String {
        let (start, end) = self.window_hours();
        format!("{:02}:00 - {:02}:00", start, end)
    }

    /// Slot whose window contains `time`
    ///
    /// Before 06:00 counts as morning, from 22:00 on as evening.
    pub fn for_time(time: NaiveTime) -> SlotId {
        let hour = time.hour();
        SlotId::ALL
            .into_iter()
            .find(|slot| {
                let (start, end) = slot.window_hours();
                hour >= start && hour < end
            })
            .unwrap_or(if hour < 6 {
                SlotId::Morning
            } else {
                SlotId::Evening
            })
    }

    /// Empty slot with the catalogue values
    pub fn empty_slot(self) -> TimeSlot {
        TimeSlot {
            id: self,
            label: self.label().to_string(),
            period: self.period(),
            target: self.target_ml(),
            current: 0,
            icon: self.icon().to_string(),
            color: self.color().to_string(),
        }
    }
}

/// The three slots with nothing consumed yet
pub fn default_time_slots() -> Vec<TimeSlot> {
    SlotId::ALL.into_iter().map(SlotId::empty_slot).collect()
}

/// Calculate progress percentage
///
/// progress = (consumed / goal) * 100, unclipped
pub fn calculate_progress(consumed_ml: i64, goal_ml: i32) -> f64 {
    if goal_ml <= 0 {
        return 0.0;
    }
    (consumed_ml as f64 / goal_ml as f64) * 100.0
}

/// Progress clipped to 0..=100 for the ring and bar visuals
pub fn ring_fill_percent(consumed_ml: i64, goal_ml: i32) -> f64 {
    calculate_progress(consumed_ml, goal_ml).clamp(0.0, 100.0)
}

/// Check if goal is met (>=100%)
pub fn is_goal_met(consumed_ml: i64, goal_ml: i32) -> bool {
    if goal_ml <= 0 {
        return false;
    }
    consumed_ml >= i64::from(goal_ml)
}

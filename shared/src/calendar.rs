//! Horizontal date strip shown above the home feed

use crate::models::{CalendarDay, DateMatch};
use chrono::{Datelike, Duration, NaiveDate};

/// Short Thai weekday labels, Sunday first
pub const THAI_WEEKDAY_LABELS: [&str; 7] = ["อา", "จ", "อ", "พ", "พฤ", "ศ", "ส"];

/// Days shown before today
pub const STRIP_DAYS_BEFORE: i64 = 2;

/// Days shown after today
pub const STRIP_DAYS_AFTER: i64 = 3;

/// Short weekday label for a date
pub fn weekday_label(date: NaiveDate) -> &'static str {
    THAI_WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

/// Build the strip from `today - 2` to `today + 3`
///
/// `is_active` marks the cell matching `selected` under `matching`.
pub fn calendar_strip(today: NaiveDate, selected: NaiveDate, matching: DateMatch) -> Vec<CalendarDay> {
    (-STRIP_DAYS_BEFORE..=STRIP_DAYS_AFTER)
        .map(|offset| {
            let date = today + Duration::days(offset);
            CalendarDay {
                day: weekday_label(date).to_string(),
                date: date.day(),
                full_date: date,
                is_active: matching.same_day(date, selected),
            }
        })
        .collect()
}

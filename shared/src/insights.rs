//! Rule-based insight cards for the insights tab
//!
//! Every rule looks at the seven days ending today, plus today's water.

use crate::analytics::{daily_calories, TrendRange};
use crate::day_stats::CalorieTarget;
use crate::models::{DayStatus, Meal};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tags that count towards the sugar warning
pub const SUGAR_TAGS: [&str; 3] = ["น้ำตาลสูง", "หวาน", "ของหวาน"];

/// Tag that counts towards the protein streak
pub const PROTEIN_TAG: &str = "โปรตีนสูง";

/// Days in a week that trigger a tag- or status-based card
pub const WEEKLY_THRESHOLD_DAYS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub icon: String,
}

impl Insight {
    fn new(id: &str, kind: InsightKind, title: &str, description: String, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description,
            icon: icon.to_string(),
        }
    }
}

/// Today's water, as reported by the hydration tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterToday {
    pub total_ml: i64,
    pub goal_ml: i32,
}

fn has_tag(meal: &Meal, tags: &[&str]) -> bool {
    meal.tags.iter().any(|t| tags.contains(&t.trim()))
}

/// Consecutive good days ending today, or yesterday when today is empty
fn good_streak(statuses: &[DayStatus]) -> usize {
    let mut iter = statuses.iter().rev().peekable();
    if iter.peek() == Some(&&DayStatus::None) {
        iter.next();
    }
    iter.take_while(|s| **s == DayStatus::Good).count()
}

/// Cards for the week ending on `today`, warnings first
pub fn derive_insights(
    meals: &[Meal],
    today: NaiveDate,
    target: &CalorieTarget,
    water: WaterToday,
) -> Vec<Insight> {
    let week_start = today - Duration::days(TrendRange::Week.days() - 1);
    let week: Vec<&Meal> = meals
        .iter()
        .filter(|m| m.date() >= week_start && m.date() <= today)
        .collect();
    let statuses: Vec<DayStatus> = daily_calories(meals, today, TrendRange::Week, target)
        .into_iter()
        .map(|d| d.status)
        .collect();

    let mut insights = Vec::new();

    let sugary = week.iter().filter(|m| has_tag(m, &SUGAR_TAGS)).count();
    if sugary >= WEEKLY_THRESHOLD_DAYS {
        insights.push(Insight::new(
            "sugar",
            InsightKind::Warning,
            "น้ำตาลสูงขึ้น",
            "สัปดาห์นี้คุณทานของหวานเยอะกว่าปกติ ลองเปลี่ยนเป็นผลไม้ดูไหมคะ? 🍎".to_string(),
            "🍭",
        ));
    }

    let over = statuses.iter().filter(|s| **s == DayStatus::Bad).count();
    if over >= WEEKLY_THRESHOLD_DAYS {
        insights.push(Insight::new(
            "calories",
            InsightKind::Warning,
            "แคลอรี่เกินเป้า",
            format!(
                "สัปดาห์นี้มี {} วันที่แคลอรี่เกินเป้า ลองลดของทอดและเครื่องดื่มหวานดูนะคะ 🍽️",
                over
            ),
            "🔥",
        ));
    }

    let protein_days: BTreeSet<NaiveDate> = week
        .iter()
        .filter(|m| has_tag(m, &[PROTEIN_TAG]))
        .map(|m| m.date())
        .collect();
    if protein_days.len() >= WEEKLY_THRESHOLD_DAYS {
        insights.push(Insight::new(
            "protein",
            InsightKind::Success,
            "โปรตีนถึงเป้า",
            format!(
                "เยี่ยมมาก! คุณทานโปรตีนครบตามเป้าหมายมา {} วันในสัปดาห์นี้แล้ว 💪",
                protein_days.len()
            ),
            "🥩",
        ));
    }

    let streak = good_streak(&statuses);
    if streak >= WEEKLY_THRESHOLD_DAYS {
        insights.push(Insight::new(
            "streak",
            InsightKind::Success,
            "คุมแคลอรี่ได้ดี",
            format!("คุณคุมแคลอรี่ได้ตามเป้า {} วันติดแล้ว ✨", streak),
            "🏆",
        ));
    }

    if water.goal_ml > 0 && water.total_ml * 2 < i64::from(water.goal_ml) {
        insights.push(Insight::new(
            "water",
            InsightKind::Info,
            "ดื่มน้ำน้อยไปนิด",
            "อย่าลืมจิบน้ำระหว่างวันให้มากขึ้นเพื่อสุขภาพที่ดีนะคะ 💧".to_string(),
            "🥤",
        ));
    }

    insights
}

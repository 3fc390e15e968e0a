//! Deterministic demo data
//!
//! Two meals today plus 2-3 meals on each of the previous nine days, and a
//! partly filled hydration tracker.

use crate::error::ApiError;
use crate::services::hydration::HydrationTracker;
use crate::services::meals::MealStore;
use chrono::{Duration, NaiveDate, NaiveTime};
use nutriscan_shared::{HydrationError, NewMeal, SlotId};
use tracing::info;

const MAIN_MEAL_TYPES: [&str; 3] = ["มื้อเช้า", "มื้อเที่ยง", "มื้อเย็น"];

const HISTORY_DAYS: i64 = 9;

struct ExampleFood {
    name: &'static str,
    image: &'static str,
    calories: i32,
}

const EXAMPLE_FOODS: [ExampleFood; 5] = [
    ExampleFood {
        name: "สลัดอกไก่",
        image: "https://picsum.photos/id/493/200/200",
        calories: 350,
    },
    ExampleFood {
        name: "แซลมอนย่าง",
        image: "https://picsum.photos/id/429/200/200",
        calories: 550,
    },
    ExampleFood {
        name: "สมูทตี้ผลไม้",
        image: "https://picsum.photos/id/1080/200/200",
        calories: 180,
    },
    ExampleFood {
        name: "กะเพราหมูสับ",
        image: "https://picsum.photos/id/292/200/200",
        calories: 600,
    },
    ExampleFood {
        name: "โยเกิร์ต",
        image: "https://picsum.photos/id/225/200/200",
        calories: 150,
    },
];

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn todays_meals(today: NaiveDate) -> Vec<NewMeal> {
    vec![
        NewMeal {
            meal_type: "มื้อเช้า".to_string(),
            food_name: "ข้าวโอ๊ตและเบอร์รี่".to_string(),
            calories: 320,
            image: "https://picsum.photos/id/493/200/200".to_string(),
            timestamp: today.and_time(time(8, 0)),
            tags: vec!["โปรตีนสูง".to_string(), "ไฟเบอร์สูง".to_string()],
        },
        NewMeal {
            meal_type: "มื้อเที่ยง".to_string(),
            food_name: "ขนมปังหน้าอวอคาโด".to_string(),
            calories: 450,
            image: "https://picsum.photos/id/429/200/200".to_string(),
            timestamp: today.and_time(time(12, 30)),
            tags: vec!["ไขมันดี".to_string(), "มังสวิรัติ".to_string()],
        },
    ]
}

/// Seed meals in display order: today first, then older days
pub fn seed_meals(today: NaiveDate) -> Vec<NewMeal> {
    let mut meals = todays_meals(today);

    for days_ago in 1..=HISTORY_DAYS {
        let date = today - Duration::days(days_ago);
        let i = days_ago as usize;
        let count = 2 + i % 2;

        for j in 0..count {
            let food = &EXAMPLE_FOODS[(i * 3 + j) % EXAMPLE_FOODS.len()];
            let jitter = ((i * 17 + j * 11) % 50) as i32;
            meals.push(NewMeal {
                meal_type: MAIN_MEAL_TYPES[(i + j) % MAIN_MEAL_TYPES.len()].to_string(),
                food_name: food.name.to_string(),
                calories: food.calories + jitter,
                image: food.image.to_string(),
                timestamp: date.and_time(time(8 + 5 * j as u32, 0)),
                tags: vec![],
            });
        }
    }

    meals
}

/// Fill an empty store so that listing shows [`seed_meals`] order
pub async fn seed_store(store: &MealStore, today: NaiveDate) -> Result<usize, ApiError> {
    let meals = seed_meals(today);
    let count = meals.len();

    for meal in meals.into_iter().rev() {
        store.add_meal(meal).await?;
    }

    info!(count, "Seeded meal store");
    Ok(count)
}

/// Reference hydration state: 800 ml morning, 450 ml afternoon
pub fn seed_hydration(tracker: &mut HydrationTracker) -> Result<(), HydrationError> {
    tracker.add_water_to(SlotId::Morning, 800)?;
    tracker.add_water_to(SlotId::Afternoon, 450)?;
    Ok(())
}

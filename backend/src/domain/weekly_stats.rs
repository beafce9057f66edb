//! Weekly best and worst meal.
//!
//! Ratings from the trailing week are grouped by the meal named at
//! submission time. Each rating contributes the mean of its four scores and
//! each meal scores the average of its ratings.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use super::calendar::start_of_day;
use super::rating::FoodRating;

/// Placeholder meal name returned when the window holds no ratings.
pub const NO_RATINGS_YET: &str = "No ratings yet";
/// Length of the statistics window in days.
pub const WINDOW_DAYS: u64 = 7;

/// Start of the statistics window: midnight seven days before `today`.
pub fn window_start(today: NaiveDate) -> DateTime<Utc> {
    let first_day = today
        .checked_sub_days(Days::new(WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    start_of_day(first_day)
}

/// Aggregate score of one meal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealScore {
    pub name: String,
    pub rating: f64,
}

impl MealScore {
    fn no_ratings() -> Self {
        Self {
            name: NO_RATINGS_YET.to_owned(),
            rating: 0.0,
        }
    }
}

/// Best and worst meal of the trailing week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyMealStats {
    pub best_meal: MealScore,
    pub worst_meal: MealScore,
    pub rating_count: usize,
}

#[derive(Default)]
struct Tally {
    total: f64,
    count: u32,
}

impl Tally {
    fn average(&self) -> f64 {
        self.total / f64::from(self.count.max(1))
    }
}

impl WeeklyMealStats {
    /// Stats for a window without ratings.
    pub fn empty() -> Self {
        Self {
            best_meal: MealScore::no_ratings(),
            worst_meal: MealScore::no_ratings(),
            rating_count: 0,
        }
    }

    /// Whether the window held no ratings.
    pub fn is_empty(&self) -> bool {
        self.rating_count == 0
    }

    /// Aggregate `ratings` by meal name.
    ///
    /// Ties are broken by the alphabetically first meal name.
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a FoodRating>) -> Self {
        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        let mut rating_count = 0;
        for rating in ratings {
            let tally = tallies.entry(rating.meal.as_str()).or_default();
            tally.total += rating.scores.mean();
            tally.count += 1;
            rating_count += 1;
        }

        let mut best: Option<(&str, f64)> = None;
        let mut worst: Option<(&str, f64)> = None;
        for (name, tally) in &tallies {
            let average = tally.average();
            if best.is_none_or(|(_, score)| average > score) {
                best = Some((*name, average));
            }
            if worst.is_none_or(|(_, score)| average < score) {
                worst = Some((*name, average));
            }
        }

        match (best, worst) {
            (Some(best), Some(worst)) => Self {
                best_meal: MealScore {
                    name: best.0.to_owned(),
                    rating: best.1,
                },
                worst_meal: MealScore {
                    name: worst.0.to_owned(),
                    rating: worst.1,
                },
                rating_count,
            },
            _ => Self::empty(),
        }
    }
}

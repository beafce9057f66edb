//! Participation streaks.
//!
//! A streak counts consecutive calendar days with at least one rating. It is
//! still alive while the most recent rated day is today or yesterday, so a
//! student who has not rated yet today keeps yesterday's streak until the
//! day ends. Any day without a rating resets it to zero.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

/// Streak length at which the top tier is reached.
pub const MASTER_STREAK: u32 = 5;

/// Streak summary for one student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStreak {
    /// Consecutive rated days ending today or yesterday.
    pub current_streak: u32,
    /// Lifetime number of ratings.
    pub total_ratings: u64,
    /// Timestamp of the most recent rating.
    pub last_rating_at: Option<DateTime<Utc>>,
}

impl RatingStreak {
    /// A student who has never rated.
    pub const fn none() -> Self {
        Self {
            current_streak: 0,
            total_ratings: 0,
            last_rating_at: None,
        }
    }

    /// Compute the streak from every rating timestamp of one student.
    ///
    /// `timestamps` may be in any order and may hold several entries for the
    /// same day.
    pub fn from_timestamps(timestamps: &[DateTime<Utc>], today: NaiveDate) -> Self {
        let Some(last_rating_at) = timestamps.iter().max().copied() else {
            return Self::none();
        };
        let rated_days: BTreeSet<NaiveDate> =
            timestamps.iter().map(DateTime::date_naive).collect();

        Self {
            current_streak: consecutive_days(&rated_days, today),
            total_ratings: u64::try_from(timestamps.len()).unwrap_or(u64::MAX),
            last_rating_at: Some(last_rating_at),
        }
    }

    /// Achievement tier shown on the student dashboard.
    pub fn tier(&self) -> StreakTier {
        StreakTier::for_streak(self.current_streak)
    }
}

fn previous_day(day: NaiveDate) -> Option<NaiveDate> {
    day.checked_sub_days(Days::new(1))
}

fn consecutive_days(rated_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if rated_days.contains(&today) {
        Some(today)
    } else {
        previous_day(today).filter(|yesterday| rated_days.contains(yesterday))
    };

    let mut streak = 0;
    let mut cursor = anchor;
    while let Some(day) = cursor.filter(|day| rated_days.contains(day)) {
        streak += 1;
        cursor = previous_day(day);
    }
    streak
}

/// Achievement tier derived from the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakTier {
    /// No active streak.
    Beginner,
    /// One or two days.
    Growing,
    /// Three or four days.
    Flourishing,
    /// Five days or more.
    MasterRater,
}

impl StreakTier {
    pub const fn for_streak(streak: u32) -> Self {
        match streak {
            0 => Self::Beginner,
            1..=2 => Self::Growing,
            3..MASTER_STREAK => Self::Flourishing,
            _ => Self::MasterRater,
        }
    }

    /// Display title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Growing => "Growing",
            Self::Flourishing => "Flourishing",
            Self::MasterRater => "Master Rater",
        }
    }
}

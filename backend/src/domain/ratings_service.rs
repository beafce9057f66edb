//! Rating submission, streaks and weekly statistics.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::calendar::day_bounds;
use crate::domain::ports::{RatingRepository, RatingRepositoryError};
use crate::domain::weekly_stats::window_start;
use crate::domain::{Error, NewRating, RatingId, RatingStreak, UserId, WeeklyMealStats};

/// Domain service for meal ratings.
#[derive(Clone)]
pub struct RatingsService<R> {
    ratings: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RatingsService<R> {
    pub fn new(ratings: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { ratings, clock }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

fn map_rating_error(error: RatingRepositoryError) -> Error {
    match error {
        RatingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("rating repository unavailable: {message}"))
        }
        RatingRepositoryError::Query { message } => {
            Error::internal(format!("rating repository error: {message}"))
        }
        RatingRepositoryError::CorruptRecord { message } => {
            warn!(%message, "stored rating row failed validation");
            Error::internal(format!("stored rating is invalid: {message}"))
        }
    }
}

impl<R> RatingsService<R>
where
    R: RatingRepository,
{
    /// Store a rating. Scores were range-checked when `rating` was built.
    pub async fn add_rating(&self, rating: NewRating) -> Result<RatingId, Error> {
        let id = self
            .ratings
            .insert(&rating)
            .await
            .map_err(map_rating_error)?;
        info!(
            rating_id = %id,
            user_id = %rating.user_id(),
            meal = rating.meal().as_str(),
            "rating recorded"
        );
        Ok(id)
    }

    /// Record that the student ate food brought from home today.
    ///
    /// Stored as a perfect rating so the day still counts towards the streak.
    pub async fn record_home_meal(&self, user_id: UserId) -> Result<RatingId, Error> {
        self.add_rating(NewRating::home_meal(user_id, self.clock.utc()))
            .await
    }

    /// Consecutive-day streak of `user_id` as of today.
    pub async fn rating_streak(&self, user_id: UserId) -> Result<RatingStreak, Error> {
        let timestamps = self
            .ratings
            .timestamps_for_user(user_id)
            .await
            .map_err(map_rating_error)?;
        let streak = RatingStreak::from_timestamps(&timestamps, self.today());
        debug!(
            %user_id,
            current_streak = streak.current_streak,
            total_ratings = streak.total_ratings,
            "streak computed"
        );
        Ok(streak)
    }

    /// Whether `user_id` has rated anything during the current UTC day.
    pub async fn has_rated_today(&self, user_id: UserId) -> Result<bool, Error> {
        let (start, end) = day_bounds(self.today());
        let count = self
            .ratings
            .count_between(user_id, start, end)
            .await
            .map_err(map_rating_error)?;
        Ok(count > 0)
    }

    /// Best and worst meal over the trailing week.
    pub async fn weekly_stats(&self) -> Result<WeeklyMealStats, Error> {
        let from = window_start(self.today());
        let ratings = self
            .ratings
            .ratings_since(from)
            .await
            .map_err(map_rating_error)?;
        let stats = WeeklyMealStats::from_ratings(&ratings);
        debug!(%from, rating_count = stats.rating_count, "weekly stats computed");
        Ok(stats)
    }
}

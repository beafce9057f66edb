//! Port for storing meal ratings and reading them back for statistics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{FoodRating, NewRating, RatingId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rating repository adapters.
    pub enum RatingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "rating repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "rating repository query failed: {message}",
        /// A stored row no longer satisfies the domain invariants.
        CorruptRecord { message: String } => "stored rating is invalid: {message}",
    }
}

/// Port for the append-only rating log.
///
/// Ratings are never updated or deleted, so adapters only need inserts and
/// range reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Append a rating and return its generated identifier.
    async fn insert(&self, rating: &NewRating) -> Result<RatingId, RatingRepositoryError>;

    /// Every rating timestamp of `user_id`, newest first.
    async fn timestamps_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DateTime<Utc>>, RatingRepositoryError>;

    /// Count ratings of `user_id` created in `[from, until)`.
    async fn count_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, RatingRepositoryError>;

    /// Ratings of all users created at or after `from`.
    async fn ratings_since(
        &self,
        from: DateTime<Utc>,
    ) -> Result<Vec<FoodRating>, RatingRepositoryError>;
}

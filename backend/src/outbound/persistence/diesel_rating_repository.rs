//! SQLite-backed `RatingRepository` implementation using Diesel ORM.
//!
//! Timestamps are persisted as naive UTC values, so range filters convert
//! their bounds with `naive_utc()` before binding.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RatingRepository, RatingRepositoryError};
use crate::domain::{FoodRating, MealName, NewRating, RatingId, RatingScores, UserId};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{FoodRatingRow, NewFoodRatingRow};
use super::pool::{DbPool, PoolError};
use super::schema::food_ratings;

/// Diesel-backed implementation of the [`RatingRepository`] port.
#[derive(Clone)]
pub struct DieselRatingRepository {
    pool: DbPool,
}

impl DieselRatingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> RatingRepositoryError {
    RatingRepositoryError::connection(map_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> RatingRepositoryError {
    map_basic_diesel_error(
        error,
        RatingRepositoryError::query,
        RatingRepositoryError::connection,
    )
}

fn row_to_rating(row: FoodRatingRow) -> Result<FoodRating, RatingRepositoryError> {
    let id = row.id;
    let corrupt = move |err: &dyn fmt::Display| {
        RatingRepositoryError::corrupt_record(format!("rating {id}: {err}"))
    };
    let scores = RatingScores::try_new(
        i64::from(row.taste_rating),
        i64::from(row.portion_rating),
        i64::from(row.variety_rating),
        i64::from(row.overall_rating),
    )
    .map_err(|err| corrupt(&err))?;
    let meal = MealName::new(&row.meal_name).map_err(|err| corrupt(&err))?;

    Ok(FoodRating {
        id: RatingId::new(id),
        user_id: UserId::new(row.user_id),
        meal,
        scores,
        comment: row.comment,
        created_at: row.created_at.and_utc(),
    })
}

#[async_trait]
impl RatingRepository for DieselRatingRepository {
    async fn insert(&self, rating: &NewRating) -> Result<RatingId, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let scores = rating.scores();
        let new_row = NewFoodRatingRow {
            user_id: rating.user_id().get(),
            meal_name: rating.meal().as_str(),
            taste_rating: i32::from(scores.taste.get()),
            portion_rating: i32::from(scores.portion.get()),
            variety_rating: i32::from(scores.variety.get()),
            overall_rating: i32::from(scores.overall.get()),
            comment: rating.comment(),
            created_at: rating.created_at().naive_utc(),
        };

        let id: i64 = diesel::insert_into(food_ratings::table)
            .values(&new_row)
            .returning(food_ratings::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(RatingId::new(id))
    }

    async fn timestamps_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<DateTime<Utc>>, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let stamps: Vec<NaiveDateTime> = food_ratings::table
            .filter(food_ratings::user_id.eq(user_id.get()))
            .select(food_ratings::created_at)
            .order_by(food_ratings::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(stamps.into_iter().map(|stamp| stamp.and_utc()).collect())
    }

    async fn count_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let count: i64 = food_ratings::table
            .filter(food_ratings::user_id.eq(user_id.get()))
            .filter(food_ratings::created_at.ge(from.naive_utc()))
            .filter(food_ratings::created_at.lt(until.naive_utc()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn ratings_since(
        &self,
        from: DateTime<Utc>,
    ) -> Result<Vec<FoodRating>, RatingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<FoodRatingRow> = food_ratings::table
            .filter(food_ratings::created_at.ge(from.naive_utc()))
            .select(FoodRatingRow::as_select())
            .order_by((food_ratings::created_at.asc(), food_ratings::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_rating).collect()
    }
}

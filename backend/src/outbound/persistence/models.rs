//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Timestamps are stored as
//! naive UTC values; conversion to `DateTime<Utc>` happens in the adapters.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{food_ratings, menu_items, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub student_id: Option<String>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub student_id: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Rating models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = food_ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct FoodRatingRow {
    pub id: i64,
    pub user_id: i64,
    pub meal_name: String,
    pub taste_rating: i32,
    pub portion_rating: i32,
    pub variety_rating: i32,
    pub overall_rating: i32,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = food_ratings)]
pub(crate) struct NewFoodRatingRow<'a> {
    pub user_id: i64,
    pub meal_name: &'a str,
    pub taste_rating: i32,
    pub portion_rating: i32,
    pub variety_rating: i32,
    pub overall_rating: i32,
    pub comment: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Menu models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = menu_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MenuItemRow {
    pub id: i64,
    pub name: String,
    pub week_start_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = menu_items)]
pub(crate) struct NewMenuItemRow<'a> {
    pub name: &'a str,
    pub week_start_date: NaiveDate,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

//! Diesel table definitions for the SQLite store.
//!
//! Stored column names are camelCase (`userId`, `weekStartDate`), matching
//! the files the mobile app already reads. Rust-side names are snake_case
//! via `sql_name`.

diesel::table! {
    users (id) {
        id -> BigInt,
        name -> Text,
        email -> Text,
        /// Argon2id PHC string.
        password -> Text,
        role -> Text,
        #[sql_name = "studentId"]
        student_id -> Nullable<Text>,
    }
}

diesel::table! {
    food_ratings (id) {
        id -> BigInt,
        #[sql_name = "userId"]
        user_id -> BigInt,
        #[sql_name = "mealName"]
        meal_name -> Text,
        #[sql_name = "tasteRating"]
        taste_rating -> Integer,
        #[sql_name = "portionRating"]
        portion_rating -> Integer,
        #[sql_name = "varietyRating"]
        variety_rating -> Integer,
        #[sql_name = "overallRating"]
        overall_rating -> Integer,
        comment -> Nullable<Text>,
        #[sql_name = "createdAt"]
        created_at -> Timestamp,
    }
}

diesel::table! {
    menu_items (id) {
        id -> BigInt,
        name -> Text,
        #[sql_name = "weekStartDate"]
        week_start_date -> Date,
        #[sql_name = "isActive"]
        is_active -> Bool,
        #[sql_name = "createdAt"]
        created_at -> Timestamp,
    }
}

diesel::joinable!(food_ratings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, food_ratings, menu_items);

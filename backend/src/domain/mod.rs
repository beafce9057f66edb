//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities the store persists and the
//! rules that derive streaks, weekly statistics and the current menu. Value
//! types validate on construction, so anything that reaches a port already
//! satisfies its invariants.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload shared by every operation.
//! - User, UserProfile, NewUser and their value types.
//! - NewRating, FoodRating, RatingScores: the rating log.
//! - RatingStreak, WeeklyMealStats: derived reads.
//! - WeekMenu, MenuItem: weekly menus.
//! - AccountsService, RatingsService, MenuService: business rules over the
//!   ports in [`ports`].

pub mod auth;
pub mod calendar;
pub mod error;
pub mod menu;
pub mod ports;
pub mod rating;
pub mod streak;
pub mod user;
pub mod weekly_stats;

mod accounts_service;
mod menu_service;
mod ratings_service;

pub use self::accounts_service::AccountsService;
pub use self::auth::{CredentialError, LoginCredentials, PASSWORD_MIN, Password, PasswordHash};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::menu::{
    MENU_ITEM_NAME_MAX, MenuItem, MenuItemId, MenuItemName, MenuValidationError, WEEK_MENU_SIZE,
    WeekMenu,
};
pub use self::menu_service::MenuService;
pub use self::rating::{
    COMMENT_MAX, FoodRating, HOME_MEAL, MEAL_NAME_MAX, MealName, NewRating, RatingDimension,
    RatingId, RatingScore, RatingScores, RatingValidationError, SCORE_MAX, SCORE_MIN,
};
pub use self::ratings_service::RatingsService;
pub use self::streak::{MASTER_STREAK, RatingStreak, StreakTier};
pub use self::user::{
    EmailAddress, FullName, NewUser, Role, StudentId, User, UserId, UserProfile,
    UserValidationError,
};
pub use self::weekly_stats::{MealScore, NO_RATINGS_YET, WeeklyMealStats};

/// Result alias used by every store operation.
///
/// # Examples
/// ```
/// use forkast::domain::{DomainResult, Error};
///
/// fn reject() -> DomainResult<()> {
///     Err(Error::invalid_request("please add all 5 menu items"))
/// }
/// assert!(reject().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;

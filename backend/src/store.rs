//! The local store facade.
//!
//! [`LocalStore`] is the one object the app holds: it owns the connection
//! pool, wires the Diesel adapters into the domain services and exposes
//! every persistence operation the screens need. It is constructed
//! explicitly and passed by reference.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::config::StoreSettings;
use crate::domain::{
    AccountsService, EmailAddress, Error, LoginCredentials, MenuItem, MenuService, NewRating,
    NewUser, RatingId, RatingStreak, RatingsService, Role, User, UserId, WeekMenu,
    WeeklyMealStats,
};
use crate::outbound::persistence::{
    DbPool, DieselMenuRepository, DieselRatingRepository, DieselUserRepository, PoolConfig,
    PoolError, SchemaBootstrapError, ensure_schema,
};

/// Handle to the SQLite-backed store.
#[derive(Clone)]
pub struct LocalStore {
    pool: DbPool,
    accounts: AccountsService<DieselUserRepository>,
    ratings: RatingsService<DieselRatingRepository>,
    menus: MenuService<DieselMenuRepository>,
}

fn map_pool_error(error: PoolError) -> Error {
    Error::service_unavailable(error.to_string())
}

fn map_bootstrap_error(error: SchemaBootstrapError) -> Error {
    Error::service_unavailable(error.to_string())
}

impl LocalStore {
    /// Open the store described by `settings` using the system clock.
    pub async fn open(settings: &StoreSettings) -> Result<Self, Error> {
        Self::open_with_clock(settings, Arc::new(DefaultClock)).await
    }

    /// Open the store with an explicit clock for "today" and submission
    /// timestamps.
    pub async fn open_with_clock(
        settings: &StoreSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, Error> {
        let config = PoolConfig::from_settings(settings);
        info!(path = config.database_path(), "opening local store");
        let pool = DbPool::new(config).await.map_err(map_pool_error)?;
        Ok(Self::from_pool(pool, clock))
    }

    /// Wire the services over an existing pool.
    pub fn from_pool(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: AccountsService::new(Arc::new(DieselUserRepository::new(pool.clone()))),
            ratings: RatingsService::new(
                Arc::new(DieselRatingRepository::new(pool.clone())),
                Arc::clone(&clock),
            ),
            menus: MenuService::new(Arc::new(DieselMenuRepository::new(pool.clone())), clock),
            pool,
        }
    }

    /// Create the tables and indexes if they are missing. Safe to repeat.
    pub async fn initialize(&self) -> Result<(), Error> {
        ensure_schema(&self.pool).await.map_err(map_bootstrap_error)
    }

    /// Register an account; a taken email fails with `Conflict`.
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserId, Error> {
        self.accounts.register(new_user).await
    }

    pub async fn get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>, Error> {
        self.accounts.find_by_email(email).await
    }

    /// The account matching both email and password, if any.
    pub async fn validate_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<User>, Error> {
        self.accounts.validate_credentials(credentials).await
    }

    /// Sign in through the login screen for `role`.
    pub async fn login(&self, credentials: &LoginCredentials, role: Role) -> Result<User, Error> {
        self.accounts.login(credentials, role).await
    }

    pub async fn add_rating(&self, rating: NewRating) -> Result<RatingId, Error> {
        self.ratings.add_rating(rating).await
    }

    /// Log a perfect-score "Brought food from home" rating stamped now.
    pub async fn record_home_meal(&self, user_id: UserId) -> Result<RatingId, Error> {
        self.ratings.record_home_meal(user_id).await
    }

    pub async fn get_rating_streak(&self, user_id: UserId) -> Result<RatingStreak, Error> {
        self.ratings.rating_streak(user_id).await
    }

    pub async fn has_rated_today(&self, user_id: UserId) -> Result<bool, Error> {
        self.ratings.has_rated_today(user_id).await
    }

    pub async fn get_weekly_stats(&self) -> Result<WeeklyMealStats, Error> {
        self.ratings.weekly_stats().await
    }

    /// Publish five dishes for the upcoming Monday in one transaction.
    pub async fn add_week_menu(&self, menu: WeekMenu) -> Result<Vec<MenuItem>, Error> {
        self.menus.publish_next_week(menu).await
    }

    /// Items of the most recent week that has already started.
    pub async fn get_current_menu(&self) -> Result<Vec<MenuItem>, Error> {
        self.menus.current_menu().await
    }
}

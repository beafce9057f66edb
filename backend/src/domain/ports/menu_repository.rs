//! Port for weekly menu persistence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{MenuItem, WeekMenu};

use super::define_port_error;

define_port_error! {
    /// Errors raised by menu repository adapters.
    pub enum MenuRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "menu repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "menu repository query failed: {message}",
        /// A stored row no longer satisfies the domain invariants.
        CorruptRecord { message: String } => "stored menu item is invalid: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Insert every item of `menu` for the week starting `week_start`.
    ///
    /// The batch is atomic: either all items are stored or none are. Items
    /// are returned in input order.
    async fn publish_week(
        &self,
        menu: &WeekMenu,
        week_start: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError>;

    /// Active items whose week starts on or before `day`, ordered by week
    /// descending then name ascending.
    async fn active_items_on_or_before(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError>;
}

//! Weekly menu publication and lookup.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::calendar::upcoming_monday;
use crate::domain::menu::latest_week;
use crate::domain::ports::{MenuRepository, MenuRepositoryError};
use crate::domain::{Error, MenuItem, WeekMenu};

/// Domain service for the weekly menu.
#[derive(Clone)]
pub struct MenuService<M> {
    menus: Arc<M>,
    clock: Arc<dyn Clock>,
}

impl<M> MenuService<M> {
    pub fn new(menus: Arc<M>, clock: Arc<dyn Clock>) -> Self {
        Self { menus, clock }
    }
}

fn map_menu_error(error: MenuRepositoryError) -> Error {
    match error {
        MenuRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("menu repository unavailable: {message}"))
        }
        MenuRepositoryError::Query { message } => {
            Error::internal(format!("menu repository error: {message}"))
        }
        MenuRepositoryError::CorruptRecord { message } => {
            warn!(%message, "stored menu row failed validation");
            Error::internal(format!("stored menu item is invalid: {message}"))
        }
    }
}

impl<M> MenuService<M>
where
    M: MenuRepository,
{
    /// Publish `menu` for the upcoming Monday, or today when today is a
    /// Monday.
    pub async fn publish_next_week(&self, menu: WeekMenu) -> Result<Vec<MenuItem>, Error> {
        let now = self.clock.utc();
        let week_start = upcoming_monday(now.date_naive());
        let items = self
            .menus
            .publish_week(&menu, week_start, now)
            .await
            .map_err(map_menu_error)?;
        info!(%week_start, items = items.len(), "weekly menu published");
        Ok(items)
    }

    /// Active items of the latest week that has already started, by name.
    pub async fn current_menu(&self) -> Result<Vec<MenuItem>, Error> {
        let today = self.clock.utc().date_naive();
        let items = self
            .menus
            .active_items_on_or_before(today)
            .await
            .map_err(map_menu_error)?;
        let current = latest_week(items);
        debug!(%today, items = current.len(), "current menu loaded");
        Ok(current)
    }
}

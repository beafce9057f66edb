//! SQLite-backed `MenuRepository` implementation using Diesel ORM.
//!
//! A weekly menu is inserted inside one transaction so a failure part-way
//! through leaves no partial week behind.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{MenuRepository, MenuRepositoryError};
use crate::domain::{MenuItem, MenuItemId, MenuItemName, WeekMenu};

use super::diesel_error_mapping::{map_basic_diesel_error, map_pool_error};
use super::models::{MenuItemRow, NewMenuItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::menu_items;

/// Diesel-backed implementation of the [`MenuRepository`] port.
#[derive(Clone)]
pub struct DieselMenuRepository {
    pool: DbPool,
}

impl DieselMenuRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> MenuRepositoryError {
    MenuRepositoryError::connection(map_pool_error(error))
}

fn map_diesel(error: diesel::result::Error) -> MenuRepositoryError {
    map_basic_diesel_error(
        error,
        MenuRepositoryError::query,
        MenuRepositoryError::connection,
    )
}

fn row_to_item(row: MenuItemRow) -> Result<MenuItem, MenuRepositoryError> {
    let name = MenuItemName::new(&row.name).map_err(|err| {
        MenuRepositoryError::corrupt_record(format!("menu item {}: {err}", row.id))
    })?;
    Ok(MenuItem {
        id: MenuItemId::new(row.id),
        name,
        week_start_date: row.week_start_date,
        is_active: row.is_active,
        created_at: row.created_at.and_utc(),
    })
}

#[async_trait]
impl MenuRepository for DieselMenuRepository {
    async fn publish_week(
        &self,
        menu: &WeekMenu,
        week_start: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let created_at = created_at.naive_utc();

        let rows = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let mut rows = Vec::with_capacity(menu.items().len());
                    for name in menu.items() {
                        let new_row = NewMenuItemRow {
                            name: name.as_str(),
                            week_start_date: week_start,
                            is_active: true,
                            created_at,
                        };
                        let row: MenuItemRow = diesel::insert_into(menu_items::table)
                            .values(&new_row)
                            .returning(MenuItemRow::as_returning())
                            .get_result(conn)
                            .await?;
                        rows.push(row);
                    }
                    Ok(rows)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        debug!(%week_start, rows = rows.len(), "menu rows inserted");
        rows.into_iter().map(row_to_item).collect()
    }

    async fn active_items_on_or_before(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<MenuItem>, MenuRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<MenuItemRow> = menu_items::table
            .filter(menu_items::is_active.eq(true))
            .filter(menu_items::week_start_date.le(day))
            .select(MenuItemRow::as_select())
            .order_by((menu_items::week_start_date.desc(), menu_items::name.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_item).collect()
    }
}

//! Weekly menus published by dining staff.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Error;

/// Number of dishes in one weekly menu.
pub const WEEK_MENU_SIZE: usize = 5;
/// Maximum length of a dish name.
pub const MENU_ITEM_NAME_MAX: usize = 80;

/// Validation errors returned by menu constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuValidationError {
    WrongItemCount { expected: usize, actual: usize },
    EmptyItemName { position: usize },
    ItemNameTooLong { position: usize, max: usize },
}

impl fmt::Display for MenuValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongItemCount { expected, actual } => {
                write!(f, "a weekly menu needs exactly {expected} items, got {actual}")
            }
            Self::EmptyItemName { position } => {
                write!(f, "menu item {position} must not be empty")
            }
            Self::ItemNameTooLong { position, max } => {
                write!(f, "menu item {position} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for MenuValidationError {}

impl From<MenuValidationError> for Error {
    fn from(err: MenuValidationError) -> Self {
        Error::invalid_request(err.to_string())
    }
}

/// Store-generated menu item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(i64);

impl MenuItemId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Name of a dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MenuItemName(String);

impl MenuItemName {
    fn at_position(name: &str, position: usize) -> Result<Self, MenuValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MenuValidationError::EmptyItemName { position });
        }
        if trimmed.chars().count() > MENU_ITEM_NAME_MAX {
            return Err(MenuValidationError::ItemNameTooLong {
                position,
                max: MENU_ITEM_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a single dish name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, MenuValidationError> {
        Self::at_position(name.as_ref(), 1)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for MenuItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Exactly five dishes for one week.
///
/// # Examples
/// ```
/// use forkast::domain::WeekMenu;
///
/// let menu = WeekMenu::try_from_names(["Tacos", "Ramen", "Curry", "Pasta", "Chili"]).unwrap();
/// assert_eq!(menu.items().len(), 5);
/// assert!(WeekMenu::try_from_names(["Tacos"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekMenu([MenuItemName; WEEK_MENU_SIZE]);

impl WeekMenu {
    /// Validate the dish names. Positions in errors are 1-based.
    pub fn try_from_names<I, S>(names: I) -> Result<Self, MenuValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| MenuItemName::at_position(name.as_ref(), index + 1))
            .collect::<Result<Vec<_>, _>>()?;
        let actual = items.len();
        let items: [MenuItemName; WEEK_MENU_SIZE] =
            items
                .try_into()
                .map_err(|_| MenuValidationError::WrongItemCount {
                    expected: WEEK_MENU_SIZE,
                    actual,
                })?;
        Ok(Self(items))
    }

    /// Dishes in the order they were entered.
    pub fn items(&self) -> &[MenuItemName] {
        &self.0
    }
}

/// A stored menu row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: MenuItemName,
    /// Monday of the week the dish is served.
    pub week_start_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Keep only the items of the most recent week in `items`.
///
/// `items` must already be ordered by week descending; the leading week is
/// retained and its items keep their order.
pub fn latest_week(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let Some(week) = items.first().map(|item| item.week_start_date) else {
        return items;
    };
    items
        .into_iter()
        .take_while(|item| item.week_start_date == week)
        .collect()
}

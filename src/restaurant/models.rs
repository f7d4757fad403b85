//! Menu and booking records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MenuItem {
    /// Store-assigned identifier.
    pub id: i64,
    pub name: String,
    /// Whole currency units.
    pub price: i64,
    pub description: String,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Fields for a menu item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
}

/// Partial edit of a menu item; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
}

impl MenuItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.description.is_none()
    }
}

/// A table reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    /// Store-assigned identifier.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Party size. Not range checked.
    pub guest_number: i64,
    pub comment: String,
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Booking fields that passed form validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub guest_number: i64,
    pub comment: String,
}

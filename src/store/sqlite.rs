//! SQLite store backed by a `sqlx` connection pool.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::DatabaseConfig;
use crate::restaurant::validation::{
    validate_required_text, validate_text_len, MAX_DESCRIPTION_LEN, MAX_MENU_NAME_LEN,
};
use crate::restaurant::{
    Booking, Catalog, Ledger, MenuItem, MenuItemUpdate, NewBooking, NewMenuItem, StoreError,
    StoreResult,
};

const MENU_COLUMNS: &str = "id, name, price, description";
const BOOKING_COLUMNS: &str = "id, first_name, last_name, guest_number, comment";

/// Database service; owns a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the configured database and apply pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(config.create_if_missing)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
        if is_memory_url(&config.url) {
            // Each connection to :memory: is its own database.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;

        tracing::info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Database ready"
        );
        Ok(store)
    }

    /// A fresh, migrated, private in-memory database.
    pub async fn in_memory() -> StoreResult<Self> {
        Self::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            create_if_missing: true,
        })
        .await
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ---- menu administration ----

    pub async fn create_menu_item(&self, item: NewMenuItem) -> StoreResult<MenuItem> {
        check_menu_name(&item.name)?;
        check_description(&item.description)?;

        let created = sqlx::query_as::<_, MenuItem>(&format!(
            "INSERT INTO menu_item (name, price, description) VALUES (?, ?, ?) RETURNING {MENU_COLUMNS}"
        ))
        .bind(item.name)
        .bind(item.price)
        .bind(item.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(menu_item_id = created.id, name = %created.name, "Menu item created");
        Ok(created)
    }

    pub async fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> StoreResult<MenuItem> {
        if let Some(name) = &update.name {
            check_menu_name(name)?;
        }
        if let Some(description) = &update.description {
            check_description(description)?;
        }

        let updated = sqlx::query_as::<_, MenuItem>(&format!(
            "UPDATE menu_item SET name = COALESCE(?, name), price = COALESCE(?, price), \
             description = COALESCE(?, description) WHERE id = ? RETURNING {MENU_COLUMNS}"
        ))
        .bind(update.name)
        .bind(update.price)
        .bind(update.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Menu item",
            id,
        })?;

        tracing::info!(menu_item_id = id, "Menu item updated");
        Ok(updated)
    }

    pub async fn delete_menu_item(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM menu_item WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Menu item",
                id,
            });
        }
        tracing::info!(menu_item_id = id, "Menu item deleted");
        Ok(())
    }

    // ---- booking administration ----

    pub async fn list_bookings(&self) -> StoreResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM booking ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    pub async fn get_booking(&self, id: i64) -> StoreResult<Booking> {
        sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM booking WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Booking",
            id,
        })
    }

    pub async fn count_bookings(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM booking")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn delete_booking(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM booking WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "Booking",
                id,
            });
        }
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(())
    }
}

#[async_trait]
impl Catalog for SqliteStore {
    async fn list_all(&self) -> StoreResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_item ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<MenuItem> {
        sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_COLUMNS} FROM menu_item WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Menu item",
            id,
        })
    }
}

#[async_trait]
impl Ledger for SqliteStore {
    async fn create(&self, booking: NewBooking) -> StoreResult<Booking> {
        let created = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO booking (first_name, last_name, guest_number, comment) \
             VALUES (?, ?, ?, ?) RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking.first_name)
        .bind(booking.last_name)
        .bind(booking.guest_number)
        .bind(booking.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn check_menu_name(name: &str) -> StoreResult<()> {
    validate_required_text(name, MAX_MENU_NAME_LEN)
        .map_err(|message| StoreError::Invalid { field: "name", message })
}

fn check_description(description: &str) -> StoreResult<()> {
    validate_text_len(description, MAX_DESCRIPTION_LEN).map_err(|message| StoreError::Invalid {
        field: "description",
        message,
    })
}

//! Shared test utilities for `FoodPrint`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test items with sensible defaults.

use crate::{
    core::{
        item::{Category, FoodItem},
        store::DbItemStore,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber that writes through the test harness.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an empty store over a fresh in-memory database.
pub async fn setup_test_store() -> Result<DbItemStore> {
    Ok(DbItemStore::new(setup_test_db().await?))
}

/// Fixed reference date used across tests.
///
/// # Panics
/// Never; the date is a valid constant.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * `category`: Fridge
/// * `barcode`, `brand`: None
#[must_use]
pub fn test_item(id: &str, name: &str, expiry_date: Option<NaiveDate>) -> FoodItem {
    FoodItem {
        id: id.to_string(),
        name: name.to_string(),
        category: Category::Fridge,
        expiry_date,
        barcode: None,
        brand: None,
    }
}

/// Creates a test item expiring `offset` days after [`test_today`] (negative
/// offsets give expired items).
#[must_use]
pub fn item_in_days(id: &str, name: &str, offset: i64) -> FoodItem {
    let expiry = test_today() + chrono::Duration::days(offset);
    test_item(id, name, Some(expiry))
}

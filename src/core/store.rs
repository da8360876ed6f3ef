//! Item persistence.
//!
//! [`ItemStore`] is the only way the rest of the crate reads or writes items. A
//! store value is passed explicitly to every consumer; there is no global store.
//! [`DbItemStore`] is the `SeaORM`/`SQLite` implementation used by the bot.

use crate::{
    core::item::FoodItem,
    entities::food_item,
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use std::{collections::HashSet, future::Future};
use tracing::{debug, info, instrument, warn};

/// Read/append/overwrite/delete surface over the item collection.
///
/// Writes are last-write-wins. `list_all` returns items in insertion order.
pub trait ItemStore: Send + Sync {
    /// Every stored item, oldest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<FoodItem>>> + Send;

    /// Stores a new item. Fails with [`Error::DuplicateItem`] if the id is taken.
    fn append(&self, item: FoodItem) -> impl Future<Output = Result<FoodItem>> + Send;

    /// Replaces the whole collection atomically; `items` order becomes the new
    /// insertion order.
    fn replace_all(&self, items: Vec<FoodItem>) -> impl Future<Output = Result<()>> + Send;

    /// Deletes one item. Returns `false` when no item had this id.
    fn remove_by_id(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Whether an item with this id is stored.
    fn contains(&self, id: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// [`ItemStore`] backed by the `food_items` table.
#[derive(Debug)]
pub struct DbItemStore {
    db: DatabaseConnection,
}

impl DbItemStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Inserts one row. A primary-key clash, e.g. a concurrent append that won
    /// the race for the same id, becomes [`Error::DuplicateItem`].
    async fn insert_at(&self, item: FoodItem, position: i64) -> Result<food_item::Model> {
        let id = item.id.clone();
        match to_active_model(item, position).insert(&self.db).await {
            Ok(model) => Ok(model),
            Err(e) => {
                let clash = matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                    || self.contains(&id).await?;
                Err(if clash {
                    Error::DuplicateItem { id }
                } else {
                    Error::Database(e)
                })
            }
        }
    }
}

fn to_active_model(item: FoodItem, position: i64) -> food_item::ActiveModel {
    food_item::ActiveModel {
        id: Set(item.id),
        position: Set(position),
        name: Set(item.name),
        category: Set(item.category.as_str().to_string()),
        expiry_date: Set(item.expiry_date.map(|d| d.format("%Y-%m-%d").to_string())),
        barcode: Set(item.barcode),
        brand: Set(item.brand),
        created_at: Set(Utc::now().naive_utc()),
    }
}

impl ItemStore for DbItemStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<FoodItem>> {
        let models = food_item::Entity::find()
            .order_by_asc(food_item::Column::Position)
            .all(&self.db)
            .await?;
        debug!("Fetched {} items.", models.len());
        Ok(models
            .into_iter()
            .filter_map(|model| {
                let id = model.id.clone();
                FoodItem::try_from(model)
                    .inspect_err(|e| warn!("Skipping unreadable item '{}': {}", id, e))
                    .ok()
            })
            .collect())
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn append(&self, item: FoodItem) -> Result<FoodItem> {
        if self.contains(&item.id).await? {
            return Err(Error::DuplicateItem { id: item.id });
        }

        let position = food_item::Entity::find()
            .order_by_desc(food_item::Column::Position)
            .one(&self.db)
            .await?
            .map_or(0, |last| last.position + 1);

        let model = self.insert_at(item, position).await?;
        debug!("Appended item '{}' at position {}", model.id, position);
        FoodItem::try_from(model)
    }

    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn replace_all(&self, items: Vec<FoodItem>) -> Result<()> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(Error::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }

        let count = items.len();
        let txn = self.db.begin().await?;
        food_item::Entity::delete_many().exec(&txn).await?;
        for (position, item) in (0_i64..).zip(items) {
            to_active_model(item, position).insert(&txn).await?;
        }
        txn.commit().await?;

        info!("Replaced item collection with {} items", count);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_by_id(&self, id: &str) -> Result<bool> {
        let result = food_item::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        info!(
            "Attempted to delete item '{}', rows affected: {}",
            id, result.rows_affected
        );
        Ok(result.rows_affected > 0)
    }

    async fn contains(&self, id: &str) -> Result<bool> {
        Ok(food_item::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .is_some())
    }
}

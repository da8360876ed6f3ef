//! Food item domain type and creation flow.
//!
//! Items are created from the manual-entry or scan-entry flow, appended to an
//! [`ItemStore`], deleted by id and never edited in place.

use crate::{
    core::{
        expiry::{self, Assessment},
        lookup::ProductInfo,
        store::ItemStore,
    },
    entities::food_item,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{info, warn};

/// Where an item is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Refrigerated
    Fridge,
    /// Frozen
    Freezer,
    /// Kitchen pantry
    Pantry,
    /// Any other dry storage
    Storage,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [Self::Fridge, Self::Freezer, Self::Pantry, Self::Storage];

    /// Capitalized display name, also the stored form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fridge => "Fridge",
            Self::Freezer => "Freezer",
            Self::Pantry => "Pantry",
            Self::Storage => "Storage",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidCategory {
                value: s.to_string(),
            })
    }
}

/// A tracked food item. Holds ground truth only; urgency and labels are derived
/// with [`FoodItem::assess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Opaque unique id
    pub id: String,
    /// Display name
    pub name: String,
    /// Storage location
    pub category: Category,
    /// Expiry date, absent for legacy records
    pub expiry_date: Option<NaiveDate>,
    /// Barcode for scanned items
    pub barcode: Option<String>,
    /// Brand for scanned items
    pub brand: Option<String>,
}

impl FoodItem {
    /// Classifies this item relative to `today`.
    #[must_use]
    pub fn assess(&self, today: NaiveDate) -> Assessment {
        expiry::assess(self.expiry_date, today)
    }
}

impl TryFrom<food_item::Model> for FoodItem {
    type Error = Error;

    fn try_from(model: food_item::Model) -> Result<Self> {
        let category = model.category.parse()?;
        let expiry_date = model.expiry_date.as_deref().and_then(|raw| {
            let parsed = expiry::parse_expiry_date(raw);
            if parsed.is_none() {
                warn!(
                    "Item '{}' has an unreadable expiry date {:?}, treating it as unknown",
                    model.id, raw
                );
            }
            parsed
        });

        Ok(Self {
            id: model.id,
            name: model.name,
            category,
            expiry_date,
            barcode: model.barcode,
            brand: model.brand,
        })
    }
}

/// Input for a new item, as collected by the manual or scan flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Product name
    pub name: String,
    /// Storage location
    pub category: Category,
    /// Expiry date chosen by the user
    pub expiry_date: Option<NaiveDate>,
    /// Barcode, scan flow only
    pub barcode: Option<String>,
    /// Brand, scan flow only
    pub brand: Option<String>,
}

impl NewItem {
    /// A manually entered item.
    #[must_use]
    pub const fn manual(name: String, category: Category, expiry_date: NaiveDate) -> Self {
        Self {
            name,
            category,
            expiry_date: Some(expiry_date),
            barcode: None,
            brand: None,
        }
    }

    /// An item from the scan flow, named after the looked-up product.
    #[must_use]
    pub fn scanned(
        product: ProductInfo,
        barcode: String,
        category: Category,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            name: product.name,
            category,
            expiry_date: Some(expiry_date),
            barcode: Some(barcode),
            brand: Some(product.brand),
        }
    }
}

/// Parses the expiry date typed by a user. Unlike stored dates, bad input here is
/// an error so it can be reported back before anything is saved.
pub fn parse_user_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| Error::InvalidInput {
        message: format!("Expiry date '{raw}' is not a YYYY-MM-DD date: {e}"),
    })
}

const MAX_ID_ATTEMPTS: usize = 5;

/// Picks an id derived from `now` that the store does not hold yet.
pub async fn next_item_id<S: ItemStore>(store: &S, now: DateTime<Utc>) -> Result<String> {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !store.contains(&candidate).await? {
            return Ok(candidate);
        }
        millis += 1;
    }
}

/// Validates `new_item`, assigns it an id and appends it to the store.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The store rejects the append, or keeps reporting the id as taken
pub async fn create_item<S: ItemStore>(
    store: &S,
    new_item: NewItem,
    now: DateTime<Utc>,
) -> Result<FoodItem> {
    let name = new_item.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput {
            message: "Item name cannot be empty".to_string(),
        });
    }

    let mut item = FoodItem {
        id: next_item_id(store, now).await?,
        name: name.to_string(),
        category: new_item.category,
        expiry_date: new_item.expiry_date,
        barcode: new_item.barcode,
        brand: new_item.brand,
    };

    // Another append may take the id between the check and the insert
    let mut attempts = 1;
    let stored = loop {
        match store.append(item.clone()).await {
            Err(Error::DuplicateItem { id }) if attempts < MAX_ID_ATTEMPTS => {
                warn!("Item id {} was taken concurrently, picking another", id);
                attempts += 1;
                item.id = next_item_id(store, now).await?;
            }
            result => break result?,
        }
    };
    info!(
        "Added item '{}' (ID: {}) in {} expiring {:?}",
        stored.name, stored.id, stored.category, stored.expiry_date
    );
    Ok(stored)
}

//! Food item entity - one row per tracked item.
//!
//! Only ground truth is stored here. The urgency tier and the remaining-time label
//! are derived at read time from `expiry_date`, so neither has a column.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Food item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    /// Opaque unique identifier, derived from the creation timestamp
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Insertion order, used to keep listing ties stable
    pub position: i64,
    /// Display name (e.g., "Milk")
    pub name: String,
    /// Storage location: `"Fridge"`, `"Freezer"`, `"Pantry"` or `"Storage"`
    pub category: String,
    /// Expiry date as entered, normally `YYYY-MM-DD`. Kept as text so that
    /// malformed legacy values survive and read back as unknown.
    pub expiry_date: Option<String>,
    /// Scanned barcode, if the item came from the scan flow
    pub barcode: Option<String>,
    /// Brand reported by the product lookup
    pub brand: Option<String>,
    /// When the row was written
    pub created_at: DateTime,
}

/// `FoodItem` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

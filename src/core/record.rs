//! Plain item records in the legacy JSON layout.
//!
//! A record carries `expiresIn` and `urgency` next to the ground-truth fields.
//! Those two are snapshots: they are written on export for readers that expect
//! them, and ignored on import, where they are recomputed from `expiryDate`.

use crate::{
    core::{expiry, item::FoodItem, listing::ItemView},
    errors::Result,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One item as serialized in the record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRecord {
    /// Item id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category name
    pub category: String,
    /// `YYYY-MM-DD`, absent for undated items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Remaining-time label at the time the record was written
    #[serde(default)]
    pub expires_in: String,
    /// Urgency tier at the time the record was written
    #[serde(default)]
    pub urgency: String,
    /// Barcode for scanned items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Brand for scanned items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl LegacyRecord {
    /// Snapshots a view, including its derived fields.
    #[must_use]
    pub fn from_view(view: &ItemView) -> Self {
        Self {
            id: view.item.id.clone(),
            name: view.item.name.clone(),
            category: view.item.category.to_string(),
            expiry_date: view
                .item
                .expiry_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            expires_in: view.expires_in(),
            urgency: view.urgency().to_string(),
            barcode: view.item.barcode.clone(),
            brand: view.item.brand.clone(),
        }
    }

    /// Converts back into an item, discarding `expiresIn` and `urgency`.
    ///
    /// # Errors
    /// Returns `Error::InvalidCategory` if the category is not one of the four
    /// known names. A bad date is not an error; it becomes an undated item.
    pub fn into_item(self) -> Result<FoodItem> {
        let expiry_date = self.expiry_date.as_deref().and_then(|raw| {
            let parsed = expiry::parse_expiry_date(raw);
            if parsed.is_none() {
                warn!(
                    "Record '{}' has an unreadable expiry date {:?}, importing it undated",
                    self.id, raw
                );
            }
            parsed
        });

        Ok(FoodItem {
            category: self.category.parse()?,
            id: self.id,
            name: self.name,
            expiry_date,
            barcode: self.barcode,
            brand: self.brand,
        })
    }
}

/// Parses a JSON array of records into items.
pub fn import_json(json: &str) -> Result<Vec<FoodItem>> {
    let records: Vec<LegacyRecord> = serde_json::from_str(json)?;
    debug!("Parsed {} records", records.len());
    records.into_iter().map(LegacyRecord::into_item).collect()
}

/// Reads and parses a JSON record file.
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Vec<FoodItem>> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    import_json(&contents)
}

/// Serializes items as a pretty-printed JSON array of records, with derived
/// fields computed for `today`.
pub fn export_json(items: Vec<FoodItem>, today: NaiveDate) -> Result<String> {
    let records: Vec<LegacyRecord> = items
        .into_iter()
        .map(|item| LegacyRecord::from_view(&ItemView::new(item, today)))
        .collect();
    serde_json::to_string_pretty(&records).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{expiry::Urgency, item::Category},
        errors::Error,
        test_utils::*,
    };

    #[test]
    fn test_import_ignores_stale_derived_fields() {
        // Saved as "safe" long ago; now expired
        let json = r#"[
            {"id":"1699999999999","name":"Yogurt","category":"Fridge",
             "expiryDate":"2024-03-01","expiresIn":"2 months","urgency":"safe"}
        ]"#;

        let items = import_json(json).unwrap();
        assert_eq!(items.len(), 1);
        let view = ItemView::new(items[0].clone(), test_today());
        assert_eq!(view.urgency(), Urgency::Expired);
        assert_eq!(view.expires_in(), "Expired 9 days ago");
    }

    #[test]
    fn test_import_tolerates_missing_and_bad_dates() {
        let json = r#"[
            {"id":"1","name":"Meat","category":"Freezer","expiresIn":"3 days","urgency":"urgent"},
            {"id":"2","name":"Fish","category":"Freezer","expiryDate":"not a date"}
        ]"#;

        let items = import_json(json).unwrap();
        assert!(items.iter().all(|i| i.expiry_date.is_none()));
    }

    #[test]
    fn test_import_scanned_record() {
        let json = r#"[{"id":"5","name":"Nutella","category":"Pantry",
            "expiryDate":"2025-01-01","expiresIn":"Expired","urgency":"expired",
            "barcode":"3017620422003","brand":"Ferrero"}]"#;

        let item = import_json(json).unwrap().remove(0);
        assert_eq!(item.category, Category::Pantry);
        assert_eq!(item.barcode.as_deref(), Some("3017620422003"));
        assert_eq!(item.brand.as_deref(), Some("Ferrero"));
    }

    #[test]
    fn test_import_unknown_category_is_error() {
        let json = r#"[{"id":"1","name":"Wine","category":"Cellar"}]"#;
        assert!(matches!(
            import_json(json),
            Err(Error::InvalidCategory { .. })
        ));
    }

    #[test]
    fn test_export_writes_current_derived_fields() {
        let json = export_json(
            vec![item_in_days("1", "Milk", 3), test_item("2", "Salt", None)],
            test_today(),
        )
        .unwrap();

        let records: Vec<LegacyRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records[0].expiry_date.as_deref(), Some("2024-03-13"));
        assert_eq!(records[0].expires_in, "3 days");
        assert_eq!(records[0].urgency, "urgent");
        assert_eq!(records[1].expiry_date, None);
        assert_eq!(records[1].urgency, "unknown");
        assert!(json.contains("\"expiresIn\""));
        assert!(!json.contains("\"barcode\""));
    }
}

//! Demo items for a fresh installation.

use crate::{
    core::{
        item::{Category, FoodItem},
        record,
        store::ItemStore,
    },
    errors::Result,
};
use chrono::{Days, NaiveDate};
use std::path::Path;
use tracing::{debug, info};

/// The five demo items, dated relative to `today`.
#[must_use]
pub fn demo_items(today: NaiveDate) -> Vec<FoodItem> {
    [
        ("1", "Meat", Category::Freezer, 3),
        ("2", "Fish", Category::Freezer, 2),
        ("3", "Milk", Category::Fridge, 1),
        ("4", "Sugar", Category::Storage, 30),
        ("5", "Juice", Category::Fridge, 90),
    ]
    .into_iter()
    .map(|(id, name, category, offset)| FoodItem {
        id: id.to_string(),
        name: name.to_string(),
        category,
        expiry_date: today.checked_add_days(Days::new(offset)),
        barcode: None,
        brand: None,
    })
    .collect()
}

/// Writes `items` into the store only if it is currently empty.
///
/// Returns `true` when the items were written.
pub async fn seed_if_empty<S: ItemStore>(store: &S, items: Vec<FoodItem>) -> Result<bool> {
    if !store.list_all().await?.is_empty() {
        return Ok(false);
    }
    let count = items.len();
    store.replace_all(items).await?;
    info!("Seeded empty store with {} items", count);
    Ok(true)
}

/// Fills an empty store on startup: from the record file at `import_path` when
/// one is given, otherwise with the demo items when `seed_demo` is set.
///
/// The store is checked first, so a stale `import_path` is never read once the
/// store holds items.
///
/// Returns the number of items written (0 when the store already had items).
///
/// # Errors
/// Returns an error if the record file cannot be read or parsed, or the store
/// write fails.
pub async fn seed_on_startup<S: ItemStore>(
    store: &S,
    import_path: Option<&Path>,
    seed_demo: bool,
    today: NaiveDate,
) -> Result<usize> {
    if !store.list_all().await?.is_empty() {
        debug!("Store already holds items, skipping startup seed");
        return Ok(0);
    }

    let items = match import_path {
        Some(path) => {
            info!("Importing records from {}", path.display());
            record::import_file(path)?
        }
        None if seed_demo => demo_items(today),
        None => return Ok(0),
    };
    let count = items.len();
    Ok(if seed_if_empty(store, items).await? { count } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{expiry::Urgency, listing::ItemView},
        test_utils::*,
    };

    #[test]
    fn test_demo_items_tiers() {
        let today = test_today();
        let tiers: Vec<(String, Urgency)> = demo_items(today)
            .into_iter()
            .map(|item| {
                let view = ItemView::new(item, today);
                (view.item.name.clone(), view.urgency())
            })
            .collect();

        assert_eq!(
            tiers,
            vec![
                ("Meat".to_string(), Urgency::Urgent),
                ("Fish".to_string(), Urgency::Urgent),
                ("Milk".to_string(), Urgency::Urgent),
                ("Sugar".to_string(), Urgency::Safe),
                ("Juice".to_string(), Urgency::Safe),
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() -> Result<()> {
        let store = setup_test_store().await?;

        assert!(seed_if_empty(&store, demo_items(test_today())).await?);
        assert_eq!(store.list_all().await?.len(), 5);

        store.remove_by_id("1").await?;
        assert!(!seed_if_empty(&store, demo_items(test_today())).await?);
        assert_eq!(store.list_all().await?.len(), 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_on_startup_demo_flag() -> Result<()> {
        let store = setup_test_store().await?;

        assert_eq!(seed_on_startup(&store, None, false, test_today()).await?, 0);
        assert!(store.list_all().await?.is_empty());

        assert_eq!(seed_on_startup(&store, None, true, test_today()).await?, 5);
        assert_eq!(seed_on_startup(&store, None, true, test_today()).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_on_startup_imports_file() -> Result<()> {
        let store = setup_test_store().await?;
        let path = std::env::temp_dir().join(format!(
            "foodprint-import-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"id":"a","name":"Kimchi","category":"Fridge","expiryDate":"2024-04-01"},
                {"id":"b","name":"Flour","category":"Pantry"}]"#,
        )?;

        // The import file wins over the demo flag
        let written = seed_on_startup(&store, Some(&path), true, test_today()).await;
        std::fs::remove_file(&path)?;

        assert_eq!(written?, 2);
        let names: Vec<String> = store.list_all().await?.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Kimchi", "Flour"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_on_startup_ignores_missing_import_file_when_filled() -> Result<()> {
        let store = setup_test_store().await?;
        store.append(item_in_days("1", "Milk", 1)).await?;
        let missing = std::env::temp_dir().join(format!(
            "foodprint-missing-{}.json",
            std::process::id()
        ));

        assert_eq!(
            seed_on_startup(&store, Some(&missing), false, test_today()).await?,
            0
        );
        assert_eq!(store.list_all().await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_on_startup_missing_import_file_on_empty_store() -> Result<()> {
        let store = setup_test_store().await?;
        let missing = std::env::temp_dir().join(format!(
            "foodprint-absent-{}.json",
            std::process::id()
        ));

        let result = seed_on_startup(&store, Some(&missing), true, test_today()).await;
        assert!(matches!(result, Err(crate::errors::Error::Io(_))));

        Ok(())
    }
}

//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests valid categories and the ids of stored items as the user types.

use crate::{
    bot::Context,
    core::{item::Category, store::ItemStore},
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Discord's limit on autocomplete suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Categories whose name starts with the partial input (case-insensitive).
#[must_use]
pub fn matching_categories(partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();
    Category::ALL
        .into_iter()
        .map(|c| c.as_str().to_string())
        .filter(|name| name.to_lowercase().starts_with(&partial_lower))
        .collect()
}

/// Provides autocomplete suggestions for item categories.
pub async fn autocomplete_category(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    matching_categories(partial)
}

/// Provides autocomplete suggestions for item ids, labelled with the item name.
///
/// Matches the partial input against both the name and the id.
pub async fn autocomplete_item_id(
    ctx: Context<'_>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let items = match ctx.data().store.list_all().await {
        Ok(items) => items,
        Err(e) => {
            warn!("Autocomplete could not list items: {}", e);
            return Vec::new();
        }
    };

    let partial_lower = partial.to_lowercase();
    items
        .into_iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&partial_lower) || item.id.starts_with(partial)
        })
        .take(MAX_SUGGESTIONS)
        .map(|item| {
            serenity::AutocompleteChoice::new(format!("{} ({})", item.name, item.category), item.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_categories() {
        assert_eq!(matching_categories(""), vec!["Fridge", "Freezer", "Pantry", "Storage"]);
        assert_eq!(matching_categories("fr"), vec!["Fridge", "Freezer"]);
        assert_eq!(matching_categories("PAN"), vec!["Pantry"]);
        assert!(matching_categories("cellar").is_empty());
    }
}

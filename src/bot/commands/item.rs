//! Item Discord commands - `add`, `scan`, `delete` and `export`.
//!
//! These commands create items through the core creation flow, remove them by id
//! and dump the collection in the JSON record format.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete, render},
        core::{
            item::{self, Category, NewItem},
            listing::ItemView,
            lookup, record,
            store::ItemStore,
        },
        errors::{Error, Result},
    };
    use chrono::{NaiveDate, Utc};
    use poise::serenity_prelude as serenity;
    use tracing::info;

    fn parse_entry(category: &str, expiry_date: &str) -> Result<(Category, NaiveDate)> {
        Ok((category.parse()?, item::parse_user_date(expiry_date)?))
    }

    /// Replies with a user-facing message for input errors and passes every
    /// other error on to the framework.
    async fn reply_or_propagate(ctx: Context<'_>, error: Error) -> Result<()> {
        match error {
            e @ (Error::InvalidInput { .. }
            | Error::InvalidCategory { .. }
            | Error::DuplicateItem { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
                Ok(())
            }
            e => Err(e),
        }
    }

    async fn confirm_added(ctx: Context<'_>, created: item::FoodItem) -> Result<()> {
        let view = ItemView::new(created, ctx.data().today());
        ctx.say(format!("✅ Added {}", render::format_item_line(&view)))
            .await?;
        Ok(())
    }

    /// Adds a food item by hand.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add(
        ctx: Context<'_>,
        #[description = "Product name (e.g., 'Milk')"] name: String,
        #[description = "Where the item is kept"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Expiry date as YYYY-MM-DD"] expiry_date: String,
    ) -> Result<()> {
        let (category, expiry_date) = match parse_entry(&category, &expiry_date) {
            Ok(parsed) => parsed,
            Err(e) => return reply_or_propagate(ctx, e).await,
        };

        let new_item = NewItem::manual(name, category, expiry_date);
        match item::create_item(&ctx.data().store, new_item, Utc::now()).await {
            Ok(created) => confirm_added(ctx, created).await,
            Err(e) => reply_or_propagate(ctx, e).await,
        }
    }

    /// Looks a barcode up and adds the product.
    ///
    /// If the product cannot be found the item is saved as "Product <barcode>".
    #[poise::command(slash_command, prefix_command)]
    pub async fn scan(
        ctx: Context<'_>,
        #[description = "Barcode digits (EAN/UPC)"] barcode: String,
        #[description = "Where the item is kept"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Expiry date as YYYY-MM-DD"] expiry_date: String,
    ) -> Result<()> {
        let parsed = lookup::validate_barcode(&barcode)
            .and_then(|code| parse_entry(&category, &expiry_date).map(|entry| (code, entry)));
        let (barcode, (category, expiry_date)) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return reply_or_propagate(ctx, e).await,
        };

        // The lookup is a network call; acknowledge the interaction first
        ctx.defer().await?;

        let data = ctx.data();
        let product = lookup::resolve_product(&data.lookup, &barcode).await;
        info!("Barcode {} resolved to '{}'", barcode, product.name);

        let new_item = NewItem::scanned(product, barcode, category, expiry_date);
        match item::create_item(&data.store, new_item, Utc::now()).await {
            Ok(created) => confirm_added(ctx, created).await,
            Err(e) => reply_or_propagate(ctx, e).await,
        }
    }

    /// Removes an item.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete(
        ctx: Context<'_>,
        #[description = "Item to delete"]
        #[autocomplete = "autocomplete::autocomplete_item_id"]
        id: String,
    ) -> Result<()> {
        if ctx.data().store.remove_by_id(&id).await? {
            ctx.say(format!("🗑️ Deleted item `#{id}`.")).await?;
        } else {
            ctx.say(format!(
                "❌ No item with id `{id}`. Use `/list` to see your items."
            ))
            .await?;
        }
        Ok(())
    }

    /// Downloads all items as a JSON file.
    #[poise::command(slash_command, prefix_command)]
    pub async fn export(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let items = data.store.list_all().await?;
        let count = items.len();
        let json = record::export_json(items, data.today())?;

        let attachment = serenity::CreateAttachment::bytes(json.into_bytes(), "foodItems.json");
        ctx.send(
            poise::CreateReply::default()
                .content(format!("📦 Exported {count} items."))
                .attachment(attachment),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

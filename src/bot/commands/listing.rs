//! Listing Discord commands - `list` and `notifications`.
//!
//! Both views are rebuilt from the stored items on every call, so labels and
//! tiers always match today's date.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            render::{self, EMBED_DESCRIPTION_LIMIT},
        },
        core::{
            listing::{self, ListFilter},
            notify,
            store::ItemStore,
        },
        errors::Result,
    };
    use poise::serenity_prelude as serenity;

    const EMBED_COLOR: u32 = 0x0016_A34A;

    /// Filter choices offered by `/list`.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum FilterChoice {
        #[name = "All Items"]
        All,
        #[name = "Expiring Soon"]
        Expiring,
        #[name = "Expired"]
        Expired,
        #[name = "Everything"]
        Everything,
    }

    impl From<FilterChoice> for ListFilter {
        fn from(choice: FilterChoice) -> Self {
            match choice {
                FilterChoice::All => Self::All,
                FilterChoice::Expiring => Self::Expiring,
                FilterChoice::Expired => Self::Expired,
                FilterChoice::Everything => Self::Everything,
            }
        }
    }

    /// Shows your items, soonest expiry first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn list(
        ctx: Context<'_>,
        #[description = "Which items to show (default: all non-expired)"] filter: Option<
            FilterChoice,
        >,
    ) -> Result<()> {
        let data = ctx.data();
        let today = data.today();
        let filter = filter.map_or_else(ListFilter::default, ListFilter::from);

        let items = data.store.list_all().await?;
        let notification_count =
            notify::select_notifiable(items.clone(), today, data.config.notify_within_days).len();
        let views = listing::filter_items(
            listing::sort_for_display(items, today, data.config.expired_placement),
            filter,
        );

        let description = if views.is_empty() {
            "Nothing here. Use `/add` or `/scan` to track an item.".to_string()
        } else {
            let lines: Vec<String> = views.iter().map(render::format_item_line).collect();
            render::join_limited(&lines, "\n", EMBED_DESCRIPTION_LIMIT)
        };

        let footer = notify::notification_badge(notification_count).map_or_else(
            || "🔔 No notifications".to_string(),
            |badge| format!("🔔 {badge} · see /notifications"),
        );

        let embed = serenity::CreateEmbed::default()
            .title(format!("FoodPrint · {}", render::filter_title(filter)))
            .description(description)
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(footer));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows items expiring within the next few days, expired ones included.
    #[poise::command(slash_command, prefix_command)]
    pub async fn notifications(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let threshold = data.config.notify_within_days;
        let items = data.store.list_all().await?;
        let views = notify::select_notifiable(items, data.today(), threshold);

        let description = if views.is_empty() {
            format!("No items expiring in the next {threshold} days")
        } else {
            let lines: Vec<String> = views.iter().map(render::format_notification_line).collect();
            render::join_limited(&lines, "\n\n", EMBED_DESCRIPTION_LIMIT)
        };

        let embed = serenity::CreateEmbed::default()
            .title("Notifications")
            .author(serenity::CreateEmbedAuthor::new(notify::notification_summary(
                views.len(),
            )))
            .description(description)
            .color(EMBED_COLOR);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

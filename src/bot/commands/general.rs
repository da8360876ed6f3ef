//! General Discord commands - ping and help.
//! These commands don't touch the item store.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**FoodPrint Help**\n\
        Track your food expiry dates.\n\n\
        **Adding Items**\n\
        • `/add <name> <category> <expiry_date>` - Adds an item by hand (date as YYYY-MM-DD).\n\
        • `/scan <barcode> <category> <expiry_date>` - Looks the barcode up and adds the product.\n\n\
        **Viewing Items**\n\
        • `/list [filter]` - Shows your items, soonest expiry first.\n\
        • `/notifications` - Shows items expiring within the next few days, expired ones included.\n\n\
        **Managing Items**\n\
        • `/delete <item>` - Removes an item.\n\
        • `/export` - Downloads all items as JSON.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Categories: Fridge, Freezer, Pantry, Storage.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `FoodPrint`: slash commands,
//! autocomplete handlers, rendering helpers and the bot context.

/// Discord command implementations (items, listing, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Text rendering of item views for Discord messages
pub mod render;

use crate::{
    config::AppConfig,
    core::{lookup::OpenFoodFactsLookup, store::DbItemStore},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the injected item store, the product lookup and the settings.
pub struct BotData {
    /// Item store for all reads and writes
    pub store: DbItemStore,
    /// Barcode product lookup
    pub lookup: OpenFoodFactsLookup,
    /// Application settings
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Creates a new `BotData` from its collaborators.
    #[must_use]
    pub const fn new(
        store: DbItemStore,
        lookup: OpenFoodFactsLookup,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            store,
            lookup,
            config,
        }
    }

    /// The date every classification in a command is made against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Context type passed to every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Registers the commands and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be built or the gateway connection fails.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::add(),
                commands::scan(),
                commands::list(),
                commands::notifications(),
                commands::delete(),
                commands::export(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

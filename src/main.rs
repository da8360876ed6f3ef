use dotenvy::dotenv;
use foodprint::{
    bot::{self, BotData},
    config::{self, database},
    core::{lookup::OpenFoodFactsLookup, seed, store::DbItemStore},
    errors::{Error, Result},
};
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the database and make sure the tables exist
    let db = database::create_connection(&database::get_database_url())
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;
    let store = DbItemStore::new(db);

    // 5. Fill an empty store from the import file or the demo items
    let today = chrono::Local::now().date_naive();
    let seeded = seed::seed_on_startup(
        &store,
        app_config.import_path.as_deref(),
        app_config.seed_demo_items,
        today,
    )
    .await
    .inspect_err(|e| error!("Failed to seed item store: {}", e))?;
    if seeded > 0 {
        info!("Seeded {} items into the empty store.", seeded);
    }

    let lookup =
        OpenFoodFactsLookup::new(&app_config.lookup.base_url, app_config.lookup.timeout())?;

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is read directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let data = BotData::new(store, lookup, Arc::new(app_config));
    bot::run_bot(token, data).await
}

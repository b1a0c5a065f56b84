use std::sync::Arc;

use poise::serenity_prelude::{ClientBuilder, GatewayIntents};
use tracing::{error, info};

use tft_tracker::config::Config;
use tft_tracker::db::{self, Repository};
use tft_tracker::discord;
use tft_tracker::error::AppError;
use tft_tracker::logging;
use tft_tracker::riot::RiotClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        error!(error = %e, "❌ Fatal error");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    info!("🐙 Starting...");

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    let store = Arc::new(Repository::new(pool));

    let riot = RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_second,
    )
    .map_err(|e| AppError::Config(format!("could not build the Riot client: {e}")))?;

    let token = config.discord_token.clone();
    let framework = discord::create_framework(config, store, Arc::new(riot));

    info!("🌐 Connecting to Discord gateway");
    let mut client = ClientBuilder::new(token, GatewayIntents::non_privileged())
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}

//! Dungeon crawl chat bot.
//!
//! Reads chat messages from stdin, one per line, and prints the bot's replies.
//!
//! ```bash
//! echo "-100 1 Ann /startgame" | cargo run -p dungeon-bot -- --offline
//! ```

mod commands;
mod config;
mod console;

use config::{BotConfig, Mode};
use dungeon_core::{
    ClaudeNarrator, Dice, GameService, Narrator, NarratorConfig, OfflineNarrator, RandomDice,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dungeon_bot=info,dungeon_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = BotConfig::from_env()?;
    if config.apply_args(&args)? == Mode::Help {
        print_help();
        return Ok(());
    }

    let service = Arc::new(GameService::with_parts(
        dungeon_core::ServiceConfig {
            idle_timeout: config.idle_timeout,
        },
        dice(&config),
        narrator(&config),
    ));

    if let Some(timeout) = config.idle_timeout {
        spawn_eviction(Arc::clone(&service), timeout);
    }

    console::run(&service).await?;
    Ok(())
}

fn dice(config: &BotConfig) -> Box<dyn Dice + Send> {
    match config.seed {
        Some(seed) => {
            info!(seed, "using seeded dice");
            Box::new(RandomDice::seeded(seed))
        }
        None => Box::new(RandomDice::from_entropy()),
    }
}

fn narrator(config: &BotConfig) -> Box<dyn Narrator> {
    let (Some(api_key), true) = (&config.api_key, config.narration_enabled()) else {
        info!("narration disabled, the storyteller will use its fallback line");
        return Box::new(OfflineNarrator);
    };

    let mut settings = NarratorConfig::new();
    if let Some(model) = &config.narrator_model {
        settings = settings.with_model(model.clone());
    }
    if let Some(tokens) = config.narrator_max_tokens {
        settings = settings.with_max_tokens(tokens);
    }

    match claude::Claude::new(api_key.clone()) {
        Ok(client) => Box::new(ClaudeNarrator::new(client, settings)),
        Err(e) => {
            warn!(error = %e, "could not create the narration client");
            Box::new(OfflineNarrator)
        }
    }
}

/// Sweep idle sessions at a quarter of the timeout.
fn spawn_eviction(service: Arc<GameService>, timeout: Duration) {
    let period = (timeout / 4).max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            service.evict_idle().await;
        }
    });
}

fn print_help() {
    println!("Dungeon bot - turn-based dungeon crawl for group chats");
    println!();
    println!("USAGE:");
    println!("  dungeon-bot [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help              Show this help message");
    println!("  --offline               Never call the narration API");
    println!("  --seed <N>              Seed the dice for reproducible games");
    println!("  --idle-timeout <SECS>   End games idle for longer than SECS");
    println!();
    println!("ENVIRONMENT:");
    println!("  ANTHROPIC_API_KEY            Enables AI narration");
    println!("  DUNGEON_NARRATOR_MODEL       Model used for narration");
    println!("  DUNGEON_NARRATOR_MAX_TOKENS  Length limit for a story");
    println!("  DUNGEON_SEED                 Same as --seed");
    println!("  DUNGEON_IDLE_TIMEOUT_SECS    Same as --idle-timeout");
    println!("  RUST_LOG                     Log filter (default dungeon_bot=info,dungeon_core=info)");
    println!();
    println!("INPUT:");
    println!("  <chat_id> <user_id> <name> /command [args]   one chat message per line");
    println!("  #quit                                        exit");
}

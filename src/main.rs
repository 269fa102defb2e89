use clap::Parser;
use log::{error, info};
use std::env;
use std::path::PathBuf;
use tg_gatekeeper::bot::TelegramBot;
use tg_gatekeeper::config::{is_token_unset, GateConfig};

#[derive(Parser)]
#[command(name = "tg-gatekeeper")]
#[command(about = "A Telegram bot that reveals an exclusive link after channel membership checks")]
struct Args {
    /// JSON file with channels, reward and message templates
    #[arg(long, env = "GATE_CONFIG")]
    config: Option<PathBuf>,
}

fn log_level_from_env() -> log::LevelFilter {
    match env::var("LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "warn" | "warning" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // load .env file if it exists
    if let Err(e) = dotenvy::dotenv() {
        match e {
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file not found, which is fine
            }
            _ => {
                eprintln!("warning: failed to load .env file: {}", e);
            }
        }
    }

    env_logger::Builder::new()
        .filter_level(log_level_from_env())
        .parse_default_env()
        .init();

    let args = Args::parse();

    let bot_token = env::var("BOT_TOKEN").ok();
    if is_token_unset(bot_token.as_deref()) {
        error!("Bot token is not configured. Please set BOT_TOKEN environment variable.");
        return Err("BOT_TOKEN environment variable is required".into());
    }
    let bot_token = bot_token.unwrap_or_default();

    let config = GateConfig::load_or_default(args.config.as_deref())?;
    info!(
        "Gating access on {} channels: {}",
        config.channels.len(),
        config
            .channels
            .iter()
            .map(|channel| channel.identifier.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    info!("Starting bot...");

    let bot = TelegramBot::new(&bot_token, config);
    bot.run().await;

    info!("Bot shutdown complete");
    Ok(())
}

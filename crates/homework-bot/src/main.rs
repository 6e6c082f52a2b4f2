use clap::Parser;
use homework_bot::{
    logging::init_logging, BotArgs, BotConfig, Cursor, Poller, TelegramNotifier,
};
use review_client::ReviewClient;
use secrecy::ExposeSecret;
use telegram_client::TelegramClient;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` if present so local runs pick up the tokens
    dotenv::dotenv().ok();

    let args = BotArgs::parse();
    init_logging(&args.log_file)?;

    let config = match BotConfig::try_from(args) {
        Ok(config) => config,
        Err(e) => {
            error!(critical = true, "{}", e);
            return Err(e.into());
        }
    };

    let review = ReviewClient::new(&config.endpoint, config.practicum_token.expose_secret());
    let telegram = TelegramClient::with_api_url(
        &config.telegram_api_url,
        config.telegram_token.expose_secret(),
    );
    let notifier = TelegramNotifier::new(telegram, &config.telegram_chat_id);
    let cursor = config.from_date.map(Cursor::new).unwrap_or_else(Cursor::now);

    info!("Watching {} for chat {}", review.endpoint(), config.telegram_chat_id);
    let mut poller = Poller::new(review, notifier, &config, cursor);

    tokio::select! {
        _ = poller.run() => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

//! Command line and environment configuration
//!
//! Secrets are read from the environment (a `.env` file is loaded first by
//! the binary) and may be overridden by flags. Missing secrets are only
//! detected when `BotArgs` is turned into a `BotConfig`, so the error can
//! name all of them at once.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use review_client::DEFAULT_REVIEW_ENDPOINT;
use secrecy::SecretString;
use telegram_client::DEFAULT_TELEGRAM_API_URL;

use crate::{error::BotError, verdict::VerdictCatalog};

/// Seconds to wait between two polls
pub const DEFAULT_RETRY_SECS: u64 = 600;

pub const DEFAULT_LOG_FILE: &str = "homework_bot.log";

/// Homework bot - reports homework review status changes to Telegram
#[derive(Debug, Clone, Parser)]
#[command(name = "homework_bot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Polls the homework review API and reports status changes to Telegram")]
pub struct BotArgs {
    /// OAuth token for the review API
    #[arg(long, env = "PRACTICUM_TOKEN", hide_env_values = true)]
    pub practicum_token: Option<String>,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Chat that receives the notifications
    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Review API endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_REVIEW_ENDPOINT)]
    pub endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    pub telegram_api_url: String,

    /// Seconds between polls
    #[arg(long, env = "RETRY_TIME", default_value_t = DEFAULT_RETRY_SECS)]
    pub retry_secs: u64,

    /// Start of the first polling window (epoch seconds, defaults to now)
    #[arg(long, env = "FROM_DATE")]
    pub from_date: Option<u64>,

    /// File the log is appended to
    #[arg(long, env = "LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

/// Validated, immutable bot configuration
#[derive(Debug)]
pub struct BotConfig {
    pub practicum_token: SecretString,
    pub telegram_token: SecretString,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    pub retry_interval: Duration,
    pub from_date: Option<u64>,
    pub verdicts: VerdictCatalog,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<BotArgs> for BotConfig {
    type Error = BotError;

    fn try_from(args: BotArgs) -> Result<Self, Self::Error> {
        let practicum_token = present(args.practicum_token);
        let telegram_token = present(args.telegram_token);
        let telegram_chat_id = present(args.telegram_chat_id);

        match (practicum_token, telegram_token, telegram_chat_id) {
            (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) => Ok(Self {
                practicum_token: SecretString::from(practicum_token),
                telegram_token: SecretString::from(telegram_token),
                telegram_chat_id,
                endpoint: args.endpoint,
                telegram_api_url: args.telegram_api_url,
                retry_interval: Duration::from_secs(args.retry_secs),
                from_date: args.from_date,
                verdicts: VerdictCatalog::default(),
            }),
            (practicum_token, telegram_token, telegram_chat_id) => {
                let missing = [
                    ("PRACTICUM_TOKEN", practicum_token.is_none()),
                    ("TELEGRAM_TOKEN", telegram_token.is_none()),
                    ("TELEGRAM_CHAT_ID", telegram_chat_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(BotError::Configuration(missing))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn args() -> BotArgs {
        BotArgs {
            practicum_token: Some("y0_practicum".to_string()),
            telegram_token: Some("123:telegram".to_string()),
            telegram_chat_id: Some("987654".to_string()),
            endpoint: DEFAULT_REVIEW_ENDPOINT.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
            retry_secs: DEFAULT_RETRY_SECS,
            from_date: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    #[test]
    fn test_complete_args_build_config() {
        let config = BotConfig::try_from(args()).unwrap();

        assert_eq!(config.practicum_token.expose_secret(), "y0_practicum");
        assert_eq!(config.telegram_token.expose_secret(), "123:telegram");
        assert_eq!(config.telegram_chat_id, "987654");
        assert_eq!(config.retry_interval, Duration::from_secs(600));
        assert_eq!(config.verdicts, VerdictCatalog::default());
    }

    #[test]
    fn test_missing_secrets_are_all_named() {
        let mut incomplete = args();
        incomplete.practicum_token = None;
        incomplete.telegram_chat_id = Some("   ".to_string());

        let err = BotConfig::try_from(incomplete).unwrap_err();

        assert_eq!(
            err,
            BotError::Configuration(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"])
        );
    }

    #[test]
    fn test_debug_does_not_print_tokens() {
        let config = BotConfig::try_from(args()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("y0_practicum"));
        assert!(!rendered.contains("123:telegram"));
        assert!(rendered.contains("987654"));
    }

    #[test]
    fn test_flags_parse() {
        let args = BotArgs::try_parse_from([
            "homework_bot",
            "--practicum-token",
            "p",
            "--telegram-token",
            "t",
            "--telegram-chat-id",
            "c",
            "--retry-secs",
            "30",
            "--from-date",
            "1700000000",
            "--endpoint",
            "http://localhost:9000/statuses/",
        ])
        .unwrap();

        assert_eq!(args.retry_secs, 30);
        assert_eq!(args.from_date, Some(1_700_000_000));
        assert_eq!(args.endpoint, "http://localhost:9000/statuses/");

        let config = BotConfig::try_from(args).unwrap();
        assert_eq!(config.retry_interval, Duration::from_secs(30));
        assert_eq!(config.from_date, Some(1_700_000_000));
    }
}

use review_client::ReviewClientError;
use telegram_client::TelegramClientError;
use thiserror::Error;

/// Everything that can go wrong while watching a homework.
///
/// Only `Configuration` is fatal; it is returned from `main`. The poller catches every other variant,
/// reports it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Configuration(Vec<&'static str>),

    #[error("Review API unavailable: {0}")]
    RemoteService(String),

    #[error("Malformed review API response: {0}")]
    MalformedResponse(&'static str),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Incomplete homework record: {0}")]
    IncompleteSubmission(String),

    #[error("Failed to deliver Telegram message: {0}")]
    NotificationDelivery(String),
}

impl From<ReviewClientError> for BotError {
    fn from(err: ReviewClientError) -> Self {
        BotError::RemoteService(err.to_string())
    }
}

impl From<TelegramClientError> for BotError {
    fn from(err: TelegramClientError) -> Self {
        BotError::NotificationDelivery(err.to_string())
    }
}

pub type BotResult<T> = Result<T, BotError>;

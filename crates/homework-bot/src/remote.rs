//! Seams between the poller and the two remote services

use async_trait::async_trait;
use review_client::ReviewClient;
use serde_json::Value;
use telegram_client::TelegramClient;
use tracing::info;

use crate::error::BotResult;

/// Where homework statuses come from
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the raw status payload for changes since `from_date`
    async fn fetch_statuses(&self, from_date: u64) -> BotResult<Value>;
}

/// Where notifications go
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, text: &str) -> BotResult<()>;
}

#[async_trait]
impl StatusSource for ReviewClient {
    async fn fetch_statuses(&self, from_date: u64) -> BotResult<Value> {
        Ok(self.get_homework_statuses(from_date).await?)
    }
}

/// Sends notifications to one fixed Telegram chat
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient, chat_id: &str) -> Self {
        Self {
            client,
            chat_id: chat_id.to_string(),
        }
    }
}

#[async_trait]
impl MessageSink for TelegramNotifier {
    async fn send(&self, text: &str) -> BotResult<()> {
        info!("Sending message: {}", text);
        self.client.send_message(&self.chat_id, text).await?;
        Ok(())
    }
}

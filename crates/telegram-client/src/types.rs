//! Request and response types for the Telegram Bot API

use serde::{Deserialize, Serialize};

/// Body of a `sendMessage` call
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Envelope the Bot API wraps every response in
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    pub result: Option<T>,
}

/// The part of a sent message the client cares about
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SentMessage {
    pub message_id: i64,
}

//! Telegram Client - minimal Bot API client for text notifications
//!
//! Only `sendMessage` is implemented. The bot token is part of every
//! request path, so errors coming out of this crate never carry the URL.

use reqwest::Client;
use tracing::{debug, info};

pub mod types;
pub use types::*;

/// Default Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Error types for Telegram client operations
#[derive(Debug, thiserror::Error)]
pub enum TelegramClientError {
    #[error("Telegram API not reachable: {0}")]
    NotReachable(reqwest::Error),

    #[error("Telegram API returned error {status}: {description}")]
    ApiError {
        status: u16,
        description: String,
    },

    #[error("Failed to parse Telegram response: {0}")]
    ParseError(String),
}

/// Client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    api_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client talking to a Bot API server, `DEFAULT_TELEGRAM_API_URL` for the public one
    pub fn with_api_url(api_url: &str, token: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Send a plain text message to a chat
    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<SentMessage, TelegramClientError> {
        debug!("Sending Telegram message to chat {}", chat_id);

        let resp = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| TelegramClientError::NotReachable(e.without_url()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TelegramClientError::NotReachable(e.without_url()))?;

        let parsed: ApiResponse<SentMessage> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(TelegramClientError::ApiError {
                    status: status.as_u16(),
                    description: body,
                });
            }
            Err(e) => return Err(TelegramClientError::ParseError(e.to_string())),
        };

        if !status.is_success() || !parsed.ok {
            return Err(TelegramClientError::ApiError {
                status: status.as_u16(),
                description: parsed
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let sent = parsed.result.ok_or_else(|| {
            TelegramClientError::ParseError("response has no result".to_string())
        })?;
        info!("Telegram message {} delivered to chat {}", sent.message_id, chat_id);
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    type Inbox = Arc<Mutex<Vec<Value>>>;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn accept(State(inbox): State<Inbox>, Json(body): Json<Value>) -> Json<Value> {
        inbox.lock().unwrap().push(body);
        Json(json!({"ok": true, "result": {"message_id": 42, "chat": {"id": 7}}}))
    }

    async fn reject() -> (StatusCode, Json<Value>) {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"})),
        )
    }

    #[tokio::test]
    async fn test_send_message_posts_chat_and_text() {
        let inbox: Inbox = Arc::default();
        let router = Router::new()
            .route("/botTOKEN/sendMessage", post(accept))
            .with_state(inbox.clone());
        let client = TelegramClient::with_api_url(&spawn_server(router).await, "TOKEN");

        let sent = client.send_message("12345", "Привет").await.unwrap();

        assert_eq!(sent.message_id, 42);
        let received = inbox.lock().unwrap().clone();
        assert_eq!(received, vec![json!({"chat_id": "12345", "text": "Привет"})]);
    }

    #[tokio::test]
    async fn test_rejected_send_surfaces_description() {
        let router = Router::new().route("/botTOKEN/sendMessage", post(reject));
        let client = TelegramClient::with_api_url(&spawn_server(router).await, "TOKEN");

        let err = client.send_message("0", "text").await.unwrap_err();

        match err {
            TelegramClientError::ApiError { status, description } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_false_with_200_is_still_an_error() {
        let router = Router::new().route(
            "/botTOKEN/sendMessage",
            post(|| async { Json(json!({"ok": false, "description": "Forbidden: bot was blocked by the user"})) }),
        );
        let client = TelegramClient::with_api_url(&spawn_server(router).await, "TOKEN");

        let err = client.send_message("1", "text").await.unwrap_err();
        assert!(err.to_string().contains("bot was blocked"));
    }

    #[tokio::test]
    async fn test_unreachable_error_does_not_leak_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TelegramClient::with_api_url(&format!("http://{}", addr), "SECRET-TOKEN");
        let err = client.send_message("1", "text").await.unwrap_err();

        assert!(matches!(err, TelegramClientError::NotReachable(_)));
        assert!(!err.to_string().contains("SECRET-TOKEN"));
    }
}

//! Review Client - HTTP client for the homework review API
//!
//! Used by the homework bot to:
//! - Ask which submissions changed status since a given timestamp
//! - Read the server's `current_date` to move the polling window forward
//!
//! The client performs exactly one request per call. Retry and recovery
//! policy belongs to the caller.

use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use tracing::{debug, info, warn};

pub mod types;
pub use types::*;

/// Default review API endpoint
pub const DEFAULT_REVIEW_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Longest error body kept in `ReviewClientError::ApiError`, in characters
pub const MAX_ERROR_BODY_CHARS: usize = 200;

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Error types for review client operations
#[derive(Debug, thiserror::Error)]
pub enum ReviewClientError {
    #[error("Review API not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        source: reqwest::Error,
    },

    #[error("Review API returned error {status}: {body}")]
    ApiError {
        status: u16,
        body: String,
    },

    #[error("Failed to parse review API response: {0}")]
    ParseError(String),
}

/// Client for the homework review API
#[derive(Clone)]
pub struct ReviewClient {
    endpoint: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ReviewClient {
    /// Create a new client for the given endpoint, authenticating with an OAuth token
    pub fn new(endpoint: &str, token: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            token: token.to_string(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date`.
    ///
    /// Returns the decoded JSON body untouched; shape checks are left to the
    /// caller because the payload is not trusted.
    pub async fn get_homework_statuses(
        &self,
        from_date: u64,
    ) -> Result<serde_json::Value, ReviewClientError> {
        debug!("Requesting homework statuses from {} since {}", self.endpoint, from_date);

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&StatusQuery { from_date })
            .send()
            .await
            .map_err(|e| ReviewClientError::NotReachable {
                url: self.endpoint.clone(),
                source: e,
            })?;

        info!("Review API answered with {}", resp.status());

        if resp.status() != StatusCode::OK {
            let status = resp.status().as_u16();
            let body = match resp.text().await {
                Ok(body) => truncate_body(&body),
                Err(e) => {
                    warn!("Could not read review API error body: {}", e);
                    String::new()
                }
            };
            return Err(ReviewClientError::ApiError { status, body });
        }

        resp.json()
            .await
            .map_err(|e| ReviewClientError::ParseError(e.to_string()))
    }
}

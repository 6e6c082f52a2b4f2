//! Poller - the fetch, validate, interpret, notify cycle
//!
//! One cycle walks an explicit state machine:
//!
//! ```text
//! Fetching -> Validating -> Interpreting -> Notifying -> Sleeping
//!     |            |              |              |
//!     +------------+--------------+--------------+--> ReportingFailure -> Sleeping
//! ```
//!
//! `Validating` goes straight to `Sleeping` when there is no new homework.
//! The cursor moves forward only when a cycle ends in `Notified` or
//! `NoNewHomework`. `run` sleeps the same interval after every cycle,
//! whatever its outcome, and never returns.

use std::time::Duration;

use review_client::Homework;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::{
    config::BotConfig,
    cursor::Cursor,
    error::BotError,
    remote::{MessageSink, StatusSource},
    validation::{current_date, validate_response},
    verdict::StatusInterpreter,
};

/// Prefix of every failure report sent to the chat
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Longest text Telegram accepts in one message, in characters
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Cut `text` to the chat message limit, marking the cut with an ellipsis
fn fit_message(text: String) -> String {
    match text.char_indices().nth(MAX_MESSAGE_CHARS - 1) {
        Some((cut, _)) if text.chars().count() > MAX_MESSAGE_CHARS => {
            format!("{}…", &text[..cut])
        }
        _ => text,
    }
}

/// How a cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was delivered
    Notified,
    /// The review API reported no changes
    NoNewHomework,
    /// A stage failed; the failure was reported
    Failed(BotError),
}

/// Where a cycle currently is
#[derive(Debug, Clone, PartialEq)]
pub enum CycleState {
    Fetching,
    Validating(Value),
    Interpreting {
        homework: Homework,
        current_date: u64,
    },
    Notifying {
        message: String,
        current_date: u64,
    },
    ReportingFailure(BotError),
    Sleeping(CycleOutcome),
}

pub struct Poller<S, N> {
    source: S,
    sink: N,
    interpreter: StatusInterpreter,
    cursor: Cursor,
    retry_interval: Duration,
}

impl<S: StatusSource, N: MessageSink> Poller<S, N> {
    pub fn new(source: S, sink: N, config: &BotConfig, cursor: Cursor) -> Self {
        Self::with_interval(
            source,
            sink,
            StatusInterpreter::new(config.verdicts.clone()),
            cursor,
            config.retry_interval,
        )
    }

    pub fn with_interval(
        source: S,
        sink: N,
        interpreter: StatusInterpreter,
        cursor: Cursor,
        retry_interval: Duration,
    ) -> Self {
        Self {
            source,
            sink,
            interpreter,
            cursor,
            retry_interval,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Perform one state transition
    pub async fn step(&mut self, state: CycleState) -> CycleState {
        match state {
            CycleState::Fetching => match self.source.fetch_statuses(self.cursor.value()).await {
                Ok(response) => CycleState::Validating(response),
                Err(e) => CycleState::ReportingFailure(e),
            },

            CycleState::Validating(response) => {
                let checked = validate_response(&response)
                    .and_then(|homeworks| Ok((homeworks, current_date(&response)?)));
                let (homeworks, current_date) = match checked {
                    Ok(checked) => checked,
                    Err(e) => return CycleState::ReportingFailure(e),
                };

                match homeworks.into_iter().next() {
                    Some(homework) => CycleState::Interpreting {
                        homework,
                        current_date,
                    },
                    None => {
                        info!("No new homework since {}", self.cursor);
                        self.advance_cursor(current_date);
                        CycleState::Sleeping(CycleOutcome::NoNewHomework)
                    }
                }
            }

            CycleState::Interpreting {
                homework,
                current_date,
            } => match self.interpreter.interpret(&homework) {
                Ok(message) => CycleState::Notifying {
                    message,
                    current_date,
                },
                Err(e) => CycleState::ReportingFailure(e),
            },

            CycleState::Notifying {
                message,
                current_date,
            } => match self.sink.send(&message).await {
                Ok(()) => {
                    self.advance_cursor(current_date);
                    CycleState::Sleeping(CycleOutcome::Notified)
                }
                Err(e) => CycleState::ReportingFailure(e),
            },

            CycleState::ReportingFailure(cause) => {
                let report = format!("{}: {}", FAILURE_PREFIX, cause);
                error!("{}", report);
                let report = fit_message(report);
                // A broken chat is only logged here; retrying would recurse.
                if let Err(e) = self.sink.send(&report).await {
                    error!("Could not deliver failure report: {}", e);
                }
                CycleState::Sleeping(CycleOutcome::Failed(cause))
            }

            sleeping @ CycleState::Sleeping(_) => sleeping,
        }
    }

    /// Run one cycle from `Fetching` until it reaches `Sleeping`
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let mut state = CycleState::Fetching;
        loop {
            state = match self.step(state).await {
                CycleState::Sleeping(outcome) => return outcome,
                next => next,
            };
        }
    }

    /// Poll forever, sleeping the retry interval after every cycle
    pub async fn run(&mut self) {
        info!(
            "Polling started at cursor {} - every {}s",
            self.cursor,
            self.retry_interval.as_secs()
        );

        loop {
            match self.run_cycle().await {
                CycleOutcome::Notified => info!("Cycle done, cursor now {}", self.cursor),
                CycleOutcome::NoNewHomework => info!("Cycle done, nothing to report"),
                CycleOutcome::Failed(e) => warn!("Cycle failed, cursor kept at {}: {}", self.cursor, e),
            }
            sleep(self.retry_interval).await;
        }
    }

    fn advance_cursor(&mut self, current_date: u64) {
        if !self.cursor.advance_to(current_date) {
            warn!(
                "Review API current_date {} is behind cursor {}, keeping cursor",
                current_date, self.cursor
            );
        }
    }
}

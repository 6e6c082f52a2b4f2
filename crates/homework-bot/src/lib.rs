//! Homework bot - watches a homework review and reports status changes
//!
//! The bot polls the review API on a fixed interval, checks the payload,
//! turns the newest status into a message and sends it to a Telegram chat.
//! Failures at any stage are reported to the same chat and the next poll
//! happens after the usual interval.

pub mod config;
pub mod cursor;
pub mod error;
pub mod logging;
pub mod poller;
pub mod remote;
pub mod validation;
pub mod verdict;

pub use config::{BotArgs, BotConfig};
pub use cursor::Cursor;
pub use error::{BotError, BotResult};
pub use poller::{CycleOutcome, CycleState, Poller};
pub use remote::{MessageSink, StatusSource, TelegramNotifier};
pub use verdict::{StatusInterpreter, VerdictCatalog};

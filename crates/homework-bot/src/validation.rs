//! Shape checks for review API payloads
//!
//! The payload is untrusted. Checks run in a fixed order and stop at the
//! first failure; the caller decides how to recover.

use review_client::Homework;
use serde_json::Value;
use tracing::{error, info};

use crate::error::{BotError, BotResult};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validate a review API payload and return its homework records, newest first.
///
/// The list is returned as the API sent it and may be empty.
pub fn validate_response(response: &Value) -> BotResult<Vec<Homework>> {
    let Some(object) = response.as_object() else {
        error!("Review API response is not an object: {}", response);
        return Err(BotError::MalformedResponse("not an object"));
    };

    for key in [HOMEWORKS_KEY, CURRENT_DATE_KEY] {
        if !object.contains_key(key) {
            error!("Review API response has no `{}` key", key);
            return Err(BotError::MalformedResponse("missing keys"));
        }
    }

    let Some(homeworks) = object[HOMEWORKS_KEY].as_array() else {
        error!("Review API `{}` is not a list: {}", HOMEWORKS_KEY, object[HOMEWORKS_KEY]);
        return Err(BotError::MalformedResponse("homeworks not a list"));
    };

    info!("Review API response is valid ({} homework records)", homeworks.len());
    Ok(homeworks.iter().map(Homework::from_value).collect())
}

/// Read the server timestamp the next poll should start from
pub fn current_date(response: &Value) -> BotResult<u64> {
    response
        .get(CURRENT_DATE_KEY)
        .and_then(Value::as_u64)
        .ok_or_else(|| {
            error!("Review API `{}` is not a non-negative integer", CURRENT_DATE_KEY);
            BotError::MalformedResponse("current_date not an integer")
        })
}

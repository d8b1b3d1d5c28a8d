//! Error type for channel video fetches.
//!
//! Every failure is shown to the user as a single message. The variants only
//! record where that message came from.

use serde_json::Value;
use thiserror::Error;

/// Message shown for any failure the API did not describe itself.
pub const GENERAL_ERROR_MESSAGE: &str = "Whoops something went wrong. Please contact Ana or open an issue at https://github.com/analizapandac.";

/// Failure of a [`crate::youtube::VideoFetcher`] call.
///
/// `Display` yields the caller-facing message and nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Structured API error (`error.errors[0]` with reason and message)
    #[error("{message}")]
    Api { reason: String, message: String },

    /// API error with only a top-level `error.message`
    #[error("{0}")]
    Message(String),

    /// Transport failure, unreadable body or an unknown error shape.
    /// The detail is for logs only.
    #[error("{}", GENERAL_ERROR_MESSAGE)]
    Unrecognized(String),
}

impl FetchError {
    /// Classify the body of a failed response.
    ///
    /// # Arguments
    /// * `body` - Raw response body
    ///
    /// # Returns
    /// * `FetchError` - Api, Message or Unrecognized
    ///
    /// # Details
    /// An `errors` key takes precedence: when present, only its first entry is
    /// considered and the top-level message is ignored, even if the entry is
    /// missing or incomplete.
    pub fn from_error_body(body: &[u8]) -> Self {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => return Self::Unrecognized(format!("error body is not JSON: {e}")),
        };

        let error = value.get("error").unwrap_or(&Value::Null);

        if let Some(errors) = error.get("errors") {
            let Some(first) = errors.get(0) else {
                tracing::debug!(?errors, "API error list has no first entry");
                return Self::Unrecognized("empty API error list".to_string());
            };

            return match (non_empty_str(first, "reason"), non_empty_str(first, "message")) {
                (Some(reason), Some(message)) => Self::Api {
                    reason: reason.to_string(),
                    message: message.to_string(),
                },
                _ => Self::Unrecognized(format!("incomplete API error entry: {first}")),
            };
        }

        match non_empty_str(error, "message") {
            Some(message) => Self::Message(message.to_string()),
            None => Self::Unrecognized(format!("unknown error body: {value}")),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unrecognized(format!("request failed: {e}"))
    }
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

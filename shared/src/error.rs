//! Error type shared by every flow.

use thiserror::Error;

/// Errors raised while talking to the JSON API or touching the page.
///
/// Application level failures (`r != 0`) are not errors; they come back
/// as [`crate::ApiResult::Failure`] so callers can show the fixed alert.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx status.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Body is not a JSON envelope.
    #[error("Parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// `r == 0` but a required field is absent.
    #[error("response is missing `{0}`")]
    MissingPayload(&'static str),

    /// The control carries no `data-url`.
    #[error("element has no `data-url` resource")]
    MissingResource,

    /// A browser call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

use thiserror::Error;

/// Top-level error type for hookset.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// A required input was not supplied. Raised before any network activity.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// Connection failure, timeout, or a body that is not valid JSON.
    #[error("transport error: {0}")]
    Transport(String),

    /// The Bot API answered with `ok: false`.
    #[error("rejected by Bot API: {0}")]
    RemoteRejection(String),

    /// Config file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WebhookError {
    fn from(e: serde_json::Error) -> Self {
        Self::Transport(format!("malformed response body: {e}"))
    }
}

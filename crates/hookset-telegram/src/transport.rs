use async_trait::async_trait;
use hookset_core::{error::WebhookError, traits::Transport};
use tracing::debug;

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (custom proxy, TLS roots, timeouts).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<String, WebhookError> {
        // Error messages drop the URL: it carries the bot token.
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                WebhookError::Transport(format!("request failed: {}", cause_chain(&e.without_url())))
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            WebhookError::Transport(format!(
                "failed to read response: {}",
                cause_chain(&e.without_url())
            ))
        })?;

        debug!("Bot API answered {status} ({} bytes)", text.len());
        Ok(text)
    }
}

/// Join an error and all of its sources into one `a: b: c` line.
fn cause_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !msg.ends_with(&text) {
            msg.push_str(": ");
            msg.push_str(&text);
        }
        source = cause.source();
    }
    msg
}

use hookset_core::{config::Config, error::WebhookError, traits::Transport};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, info, warn};

use crate::{
    transport::HttpTransport,
    types::{TgResponse, WebhookInfo},
};

/// A webhook the Bot API accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub callback_url: String,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Webhook set successfully!\nWebhook URL: {}",
            self.callback_url
        )
    }
}

/// Registers the bot's webhook with `setWebhook`.
///
/// Holds no state besides the transport, so repeated calls are independent.
pub struct WebhookConfigurator<T = HttpTransport> {
    transport: T,
}

impl WebhookConfigurator<HttpTransport> {
    pub fn new() -> Self {
        Self::with_transport(HttpTransport::new())
    }
}

impl Default for WebhookConfigurator<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> WebhookConfigurator<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Register `https://{base_url}/api/webhook` as the bot's webhook.
    ///
    /// Exactly one request per call. `ok: false` becomes
    /// [`WebhookError::RemoteRejection`] regardless of the HTTP status.
    pub async fn configure(&self, config: &Config) -> Result<Registration, WebhookError> {
        let callback_url = config.callback_url();
        info!(
            "registering webhook {callback_url} via {}",
            config.redacted_method_url("setWebhook")
        );

        let body = serde_json::json!({ "url": callback_url });
        self.call::<bool>(config, "setWebhook", &body).await?;

        info!("webhook registered");
        Ok(Registration { callback_url })
    }

    /// Validate raw inputs, then [`configure`](Self::configure).
    ///
    /// Empty values fail with [`WebhookError::MissingArgument`] and no request is sent.
    pub async fn configure_with(
        &self,
        base_url: &str,
        bot_token: &str,
    ) -> Result<Registration, WebhookError> {
        let config = Config::new(base_url, bot_token)?;
        self.configure(&config).await
    }

    /// Fetch the current webhook status with `getWebhookInfo`.
    pub async fn webhook_info(&self, config: &Config) -> Result<WebhookInfo, WebhookError> {
        let body = serde_json::json!({});
        self.call::<WebhookInfo>(config, "getWebhookInfo", &body)
            .await?
            .ok_or_else(|| WebhookError::Transport("getWebhookInfo returned no result".into()))
    }

    /// Send one Bot API request and unwrap its envelope.
    async fn call<R: DeserializeOwned>(
        &self,
        config: &Config,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<Option<R>, WebhookError> {
        let raw = self
            .transport
            .post_json(&config.method_url(method), body)
            .await?;
        debug!("{method} response: {raw}");

        let parsed: TgResponse<R> = serde_json::from_str(&raw)?;
        if !parsed.ok {
            let description = parsed
                .description
                .unwrap_or_else(|| "unknown error".to_string());
            warn!("{method} rejected: {description}");
            return Err(WebhookError::RemoteRejection(description));
        }

        Ok(parsed.result)
    }
}

use crate::error::WebhookError;
use async_trait::async_trait;

/// Outbound HTTP seam used by the configurator.
///
/// Implementations send one JSON POST and return the complete response body
/// once it has been read to the end. Status codes are not interpreted here;
/// the Bot API reports rejections in the body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as `application/json` to `url` and buffer the reply.
    async fn post_json(&self, url: &str, body: &serde_json::Value)
        -> Result<String, WebhookError>;
}

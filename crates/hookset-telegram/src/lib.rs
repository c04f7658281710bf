//! Telegram Bot API webhook registration.
//!
//! Sends `setWebhook` (and optionally `getWebhookInfo`) over a [`Transport`].
//! Docs: <https://core.telegram.org/bots/api#setwebhook>
//!
//! [`Transport`]: hookset_core::traits::Transport

mod configurator;
mod transport;
pub mod types;

pub use configurator::{Registration, WebhookConfigurator};
pub use transport::HttpTransport;
pub use types::WebhookInfo;

mod defaults;


use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::WebhookError;
use defaults::*;

/// Environment variable that overrides the `<base-url>` positional.
pub const BASE_URL_ENV: &str = "VERCEL_URL";
/// Environment variable that overrides the `<bot-token>` positional.
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
/// Fixed path appended to the base URL to form the webhook endpoint.
pub const CALLBACK_PATH: &str = "/api/webhook";
/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "hookset.toml";

/// Optional on-disk configuration. Lowest precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Bot API origin, e.g. a self-hosted `telegram-bot-api` server.
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Values taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct CliValues {
    pub base_url: Option<String>,
    pub bot_token: Option<String>,
    pub api_url: Option<String>,
}

/// Resolved, immutable configuration for a single run.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    bot_token: String,
    api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Build a config against the public Bot API. Both values must be non-empty.
    pub fn new(
        base_url: impl Into<String>,
        bot_token: impl Into<String>,
    ) -> Result<Self, WebhookError> {
        let base_url = base_url.into();
        let bot_token = bot_token.into();
        if base_url.is_empty() {
            return Err(WebhookError::MissingArgument("base-url"));
        }
        if bot_token.is_empty() {
            return Err(WebhookError::MissingArgument("bot-token"));
        }
        Ok(Self {
            base_url,
            bot_token,
            api_url: default_api_url(),
        })
    }

    /// Point requests at a different Bot API origin.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Merge every input source into one config.
    ///
    /// Precedence per value: environment, then command line, then file.
    /// Empty strings count as absent at every layer. `api_url` has no
    /// environment override.
    pub fn resolve<F>(
        cli: &CliValues,
        file: Option<&FileConfig>,
        env: F,
    ) -> Result<Self, WebhookError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.cloned().unwrap_or_default();

        let base_url = first_present([env(BASE_URL_ENV), cli.base_url.clone(), file.base_url])
            .ok_or(WebhookError::MissingArgument("base-url"))?;
        let bot_token = first_present([env(BOT_TOKEN_ENV), cli.bot_token.clone(), file.bot_token])
            .ok_or(WebhookError::MissingArgument("bot-token"))?;

        let config = Self::new(base_url, bot_token)?;
        Ok(match first_present([cli.api_url.clone(), file.api_url]) {
            Some(api_url) => config.with_api_url(api_url),
            None => config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The webhook endpoint registered with Telegram.
    pub fn callback_url(&self) -> String {
        format!("https://{}{CALLBACK_PATH}", self.base_url)
    }

    /// Full URL for a Bot API method, e.g. `setWebhook`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.bot_token)
    }

    /// Same as [`Config::method_url`] with the token masked, for logs.
    pub fn redacted_method_url(&self, method: &str) -> String {
        format!("{}/bot<token>/{method}", self.api_url)
    }
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}

/// Load the optional TOML config file.
///
/// A missing file yields `Ok(None)` unless `required` is set. When the file
/// is not required, read and parse failures are logged and skipped too.
pub fn load(path: &str, required: bool) -> Result<Option<FileConfig>, WebhookError> {
    match read_file(path, required) {
        Err(e) if !required => {
            tracing::warn!("ignoring config file {path}: {e}");
            Ok(None)
        }
        other => other,
    }
}

fn read_file(path: &str, required: bool) -> Result<Option<FileConfig>, WebhookError> {
    let path = Path::new(path);
    if !path.exists() {
        if required {
            return Err(WebhookError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        tracing::debug!("no config file at {}, skipping", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| WebhookError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: FileConfig = toml::from_str(&content)
        .map_err(|e| WebhookError::Config(format!("failed to parse config: {}", e)))?;

    Ok(Some(config))
}

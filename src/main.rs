use clap::{CommandFactory, Parser};
use hookset_core::{
    config::{self, CliValues, Config, BASE_URL_ENV, BOT_TOKEN_ENV, DEFAULT_CONFIG_PATH},
    error::WebhookError,
};
use hookset_telegram::{WebhookConfigurator, WebhookInfo};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "hookset",
    version,
    about = "Register a Telegram bot webhook at https://<base-url>/api/webhook",
    after_help = "Environment: VERCEL_URL and BOT_TOKEN take precedence over the positionals."
)]
struct Cli {
    /// Public hostname of the deployed bot, e.g. my-bot.vercel.app.
    base_url: Option<String>,

    /// Bot API token from @BotFather.
    bot_token: Option<String>,

    /// Path to config file. Defaults to ./hookset.toml when present;
    /// an unreadable default file is skipped with a warning.
    #[arg(short, long)]
    config: Option<String>,

    /// Bot API origin (self-hosted Bot API server).
    #[arg(long)]
    api_url: Option<String>,

    /// Print getWebhookInfo after a successful registration.
    #[arg(long)]
    show_info: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let file = match cli.config.as_deref() {
        Some(path) => config::load(path, true)?,
        None => config::load(DEFAULT_CONFIG_PATH, false)?,
    };

    let values = CliValues {
        base_url: cli.base_url.clone(),
        bot_token: cli.bot_token.clone(),
        api_url: cli.api_url.clone(),
    };

    let cfg = match Config::resolve(&values, file.as_ref(), |key| std::env::var(key).ok()) {
        Ok(cfg) => cfg,
        Err(e @ WebhookError::MissingArgument(_)) => {
            eprintln!("Please provide Vercel URL and Bot Token ({e})");
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("Or set {BASE_URL_ENV} and {BOT_TOKEN_ENV}.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!("resolved {cfg:?}");

    let configurator = WebhookConfigurator::new();
    match configurator.configure(&cfg).await {
        Ok(registration) => println!("{registration}"),
        Err(WebhookError::RemoteRejection(description)) => {
            eprintln!("Failed to set webhook: {description}");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("Error setting webhook: {e}");
            return Ok(ExitCode::FAILURE);
        }
    }

    if cli.show_info {
        match configurator.webhook_info(&cfg).await {
            Ok(info) => println!("{}", render_info(&info)),
            Err(e) => {
                eprintln!("Error fetching webhook info: {e}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Multi-line summary of `getWebhookInfo` for the console.
fn render_info(info: &WebhookInfo) -> String {
    let mut lines = vec![
        "Webhook info:".to_string(),
        format!("  url: {}", if info.url.is_empty() { "(none)" } else { info.url.as_str() }),
        format!("  pending updates: {}", info.pending_update_count),
        format!("  custom certificate: {}", info.has_custom_certificate),
    ];
    if let Some(ref ip) = info.ip_address {
        lines.push(format!("  ip address: {ip}"));
    }
    if let Some(max) = info.max_connections {
        lines.push(format!("  max connections: {max}"));
    }
    if let Some(ref msg) = info.last_error_message {
        match info.last_error_date {
            Some(date) => lines.push(format!("  last error ({date}): {msg}")),
            None => lines.push(format!("  last error: {msg}")),
        }
    }
    lines.join("\n")
}

use hookset_core::{config::Config, error::WebhookError};
use hookset_telegram::WebhookConfigurator;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:ABC-def";

fn config_for(server: &MockServer) -> Config {
    Config::new("my-bot.vercel.app", TOKEN)
        .unwrap()
        .with_api_url(server.uri())
}

#[tokio::test]
async fn set_webhook_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/setWebhook")))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "url": "https://my-bot.vercel.app/api/webhook" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": true,
            "description": "Webhook was set"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reg = WebhookConfigurator::new()
        .configure(&config_for(&server))
        .await
        .unwrap();

    assert_eq!(reg.callback_url, "https://my-bot.vercel.app/api/webhook");
}

#[tokio::test]
async fn bad_request_status_is_remote_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/setWebhook")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: bad webhook: HTTPS url must be provided for webhook"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = WebhookConfigurator::new()
        .configure(&config_for(&server))
        .await
        .unwrap_err();

    match err {
        WebhookError::RemoteRejection(desc) => assert!(desc.starts_with("Bad Request")),
        other => panic!("expected RemoteRejection, got {other:?}"),
    }
}

#[tokio::test]
async fn html_error_page_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = WebhookConfigurator::new()
        .configure(&config_for(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::Transport(_)));
}

#[tokio::test]
async fn unreachable_host_is_transport_error_without_token() {
    // Port 1 on loopback refuses connections.
    let cfg = Config::new("my-bot.vercel.app", TOKEN)
        .unwrap()
        .with_api_url("http://127.0.0.1:1");

    let err = WebhookConfigurator::new().configure(&cfg).await.unwrap_err();

    match err {
        WebhookError::Transport(cause) => {
            assert!(!cause.contains(TOKEN));
            let lower = cause.to_lowercase();
            assert!(
                lower.contains("refused") || lower.contains("connect"),
                "connect failure missing from cause: {cause}"
            );
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn webhook_info_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getWebhookInfo")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "url": "https://my-bot.vercel.app/api/webhook",
                "has_custom_certificate": false,
                "pending_update_count": 0,
                "max_connections": 40,
                "ip_address": "76.76.21.21"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = WebhookConfigurator::new()
        .webhook_info(&config_for(&server))
        .await
        .unwrap();

    assert_eq!(info.url, "https://my-bot.vercel.app/api/webhook");
    assert_eq!(info.max_connections, Some(40));
}

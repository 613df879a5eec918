use reqwest::StatusCode;
use serde::Serialize;

use crate::global::Global;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// Credentials missing, no request was made.
    Skipped,
    Failed,
}

pub fn send_message_url(api_base: &str, token: &str) -> String {
    format!("{}/bot{token}/sendMessage", api_base.trim_end_matches('/'))
}

/// Posts `text` to the configured chat. Failures are logged, never returned.
#[tracing::instrument(name = "telegram", skip_all)]
pub async fn send(global: &Global, text: &str) -> Delivery {
    let Some(credentials) = &global.credentials else {
        tracing::error!("TG_BOT_TOKEN or TG_CHAT_ID is not set, skipping notification");
        return Delivery::Skipped;
    };

    let payload = SendMessage {
        chat_id: &credentials.chat_id,
        text,
        parse_mode: "Markdown",
        disable_web_page_preview: false,
    };

    let url = send_message_url(&global.config.tg_api_base, &credentials.token);

    match global.http_client.post(url).json(&payload).send().await {
        Ok(resp) if resp.status() == StatusCode::OK => {
            tracing::info!("telegram notification sent");
            Delivery::Sent
        }
        Ok(resp) => {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, body, "telegram notification failed");
            Delivery::Failed
        }
        Err(e) => {
            // the url carries the bot token
            tracing::error!(error = %e.without_url(), "telegram request failed");
            Delivery::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use tracing_test::traced_test;

    #[test]
    fn test_send_message_url() {
        assert_eq!(
            send_message_url("https://api.telegram.org", "123:abc"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert_eq!(
            send_message_url("http://127.0.0.1:8080/", "123:abc"),
            "http://127.0.0.1:8080/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessage {
            chat_id: "-10042",
            text: "hello",
            parse_mode: "Markdown",
            disable_web_page_preview: false,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "chat_id": "-10042",
                "text": "hello",
                "parse_mode": "Markdown",
                "disable_web_page_preview": false,
            })
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_missing_credentials_skip_delivery() {
        let global = Global::init(Settings {
            tg_bot_token: Some("123:abc".into()),
            tg_chat_id: None,
            // nothing listens here, a request would come back as Failed
            tg_api_base: "http://127.0.0.1:9".into(),
            ..Settings::default()
        })
        .unwrap();

        assert_eq!(send(&global, "hello").await, Delivery::Skipped);
        assert!(logs_contain("TG_BOT_TOKEN or TG_CHAT_ID is not set"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_network_error_is_logged() {
        let global = Global::init(Settings {
            tg_bot_token: Some("123:abc".into()),
            tg_chat_id: Some("-10042".into()),
            tg_api_base: "http://127.0.0.1:9".into(),
            ..Settings::default()
        })
        .unwrap();

        assert_eq!(send(&global, "hello").await, Delivery::Failed);
        assert!(logs_contain("telegram request failed"));
    }
}

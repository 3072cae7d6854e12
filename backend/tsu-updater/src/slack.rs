use crate::UpdaterResult;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use tsu_core::{CoreError, CoreResult, Notifier};

pub const SLACK_CHANNEL: &str = "#test";
pub const SLACK_USERNAME: &str = "TS3Updater";

/// Incoming-webhook payload
#[derive(Debug, Serialize)]
pub struct SlackMessage<'a> {
    pub text: &'a str,
    pub channel: &'a str,
    pub username: &'a str,
}

/// Posts messages to a Slack incoming webhook.
pub struct SlackNotifier {
    url: String,
    client: ReqwestClient,
}

impl SlackNotifier {
    pub fn new(url: &str, timeout: Duration) -> UpdaterResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &str) -> CoreResult<()> {
        let body = SlackMessage {
            text: message,
            channel: SLACK_CHANNEL,
            username: SLACK_USERNAME,
        };

        // Transport errors can echo the URL, which carries the webhook secret.
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CoreError::notification(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CoreError::notification(format!(
                "webhook returned {}: {}",
                status,
                detail.trim()
            )));
        }

        debug!("Notification delivered to {}", SLACK_CHANNEL);
        Ok(())
    }
}

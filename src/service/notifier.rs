use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), String>;
}

#[derive(Debug, Serialize)]
struct TopicMessage<'a> {
    subject: &'a str,
    message: &'a str,
}

/// Publishes run outcomes to a fixed notification topic over HTTP, with an
/// optional bearer token.
pub struct WebhookNotifier {
    http: reqwest::Client,
    topic_url: String,
    token: Option<String>,
}

impl WebhookNotifier {
    pub fn new(topic_url: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            topic_url,
            token,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), String> {
        let mut request = self
            .http
            .post(&self.topic_url)
            .json(&TopicMessage { subject, message });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("notification request failed: {}", e))?;
        if !response.status().is_success() {
            return Err(format!(
                "notification rejected with status {}",
                response.status()
            ));
        }
        Ok(())
    }
}

/// Publish without letting a notification failure escape. Notifications are
/// a secondary side effect; a failed publish is logged and dropped.
pub async fn publish_quietly(notifier: &dyn Notifier, subject: &str, message: &str) {
    match notifier.publish(subject, message).await {
        Ok(()) => info!("notification sent: {}", subject),
        Err(err) => warn!("failed to send notification: {}", err),
    }
}

use super::{Notification, Notifier};
use crate::error::Error;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::{Client, error::DisplayErrorContext};
use tracing::debug;

/// AWS SNS publisher sharing one long-lived client
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: Client,
}

impl SnsNotifier {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS provider chain (env, profile,
    /// instance metadata). No request is sent until the first publish.
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, notification: &Notification) -> Result<Option<String>, Error> {
        let output = self
            .client
            .publish()
            .topic_arn(&notification.topic_arn)
            .subject(&notification.subject)
            .message(&notification.message)
            .send()
            .await
            .map_err(|e| Error::Notification(DisplayErrorContext(&e).to_string()))?;

        let message_id = output.message_id().map(ToString::to_string);
        debug!("published to {}: {message_id:?}", notification.topic_arn);

        Ok(message_id)
    }
}

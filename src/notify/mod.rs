pub mod sns;

pub use sns::SnsNotifier;

use crate::error::Error;
use async_trait::async_trait;
use serde::Serialize;

/// A message ready to be published to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub message: String,
    pub topic_arn: String,
}

impl Notification {
    /// Build the "certificate expiring soon" notification
    #[must_use]
    pub fn expiring(domain: &str, days_left: i64, valid_to: &str, topic_arn: &str) -> Self {
        Self {
            subject: format!("{domain} Certificate Expiring Soon"),
            message: format!("{domain} certificate will expire in {days_left} days on {valid_to}."),
            topic_arn: topic_arn.to_string(),
        }
    }
}

/// Publishes notifications to a pub/sub topic
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish one notification, returning the message id if the service
    /// reports one
    ///
    /// # Errors
    ///
    /// Returns `Error::Notification` if the publish call fails
    async fn publish(&self, notification: &Notification) -> Result<Option<String>, Error>;
}

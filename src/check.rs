use crate::{
    error::Result,
    expiry::{self, Evaluation},
    notify::{Notification, Notifier},
    tls::CertificateFetcher,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

/// Resolved settings for one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub domain: String,
    pub port: u16,
    pub topic_arn: String,
    pub days_buffer: i64,
}

/// What the check did after evaluating the certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    /// Certificate still good, no notification sent
    Skipped,
    /// Notification published
    Notified {
        #[serde(skip_serializing_if = "Option::is_none")]
        message_id: Option<String>,
    },
    /// Publishing failed; logged and otherwise ignored
    NotificationFailed { reason: String },
}

/// Summary of a completed check
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub domain: String,
    pub port: u16,
    pub subject: String,
    pub issuer: String,
    pub not_after: String,
    pub valid_to: String,
    pub days_left: i64,
    pub days_buffer: i64,
    pub evaluation: Evaluation,
    pub outcome: Outcome,
    pub checked_at: String,
}

/// A single certificate expiry check: fetch, compare, notify
pub struct Check<F, N> {
    settings: Settings,
    fetcher: F,
    notifier: N,
}

impl<F, N> Check<F, N>
where
    F: CertificateFetcher,
    N: Notifier,
{
    #[must_use]
    pub const fn new(settings: Settings, fetcher: F, notifier: N) -> Self {
        Self {
            settings,
            fetcher,
            notifier,
        }
    }

    /// Run the check against the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be fetched. Notification
    /// failures are logged and reported in the `Outcome`, never returned.
    pub async fn run(&self) -> Result<Report> {
        self.run_at(Utc::now()).await
    }

    /// Run the check as if it were `now`
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be fetched
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<Report> {
        let Settings {
            domain,
            port,
            topic_arn,
            days_buffer,
        } = &self.settings;

        let cert = self.fetcher.fetch(domain, *port).await?;
        let valid_to = cert.valid_to();
        let days_left = expiry::days_left(cert.not_after, now);
        let evaluation = expiry::evaluate(days_left, *days_buffer);

        let outcome = match evaluation {
            Evaluation::Healthy => {
                info!("{days_left} days left till {domain} expiration > {days_buffer} days");
                Outcome::Skipped
            }
            Evaluation::ExpiringSoon => {
                warn!("{domain} certificate expires in {days_left} days (buffer {days_buffer})");
                let notification =
                    Notification::expiring(domain, days_left, &valid_to, topic_arn);
                match self.notifier.publish(&notification).await {
                    Ok(message_id) => {
                        info!("notification sent to {topic_arn}, message id: {message_id:?}");
                        Outcome::Notified { message_id }
                    }
                    Err(e) => {
                        error!("{e}");
                        Outcome::NotificationFailed {
                            reason: e.to_string(),
                        }
                    }
                }
            }
        };

        Ok(Report {
            domain: domain.clone(),
            port: *port,
            subject: cert.subject,
            issuer: cert.issuer,
            not_after: cert.not_after.to_rfc3339_opts(SecondsFormat::Secs, true),
            valid_to,
            days_left,
            days_buffer: *days_buffer,
            evaluation,
            outcome,
            checked_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }
}

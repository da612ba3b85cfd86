/// End-to-end check tests: local TLS server, real `TlsProbe`, fake or
/// unreachable notifier.
mod common;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_sns::config::{Credentials, Region, retry::RetryConfig};
use certpulse::{
    Check, Error, Outcome,
    expiry::Evaluation,
    notify::{Notification, Notifier, SnsNotifier},
    tls::{TlsConfig, TlsProbe},
};
use common::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl Recorder {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for Recorder {
    async fn publish(&self, notification: &Notification) -> Result<Option<String>, Error> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(Some("00000000-0000-0000-0000-000000000000".to_string()))
    }
}

fn unreachable_sns() -> SnsNotifier {
    let config = aws_sdk_sns::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("AKID", "SECRET", None, None, "test"))
        .endpoint_url(format!("http://127.0.0.1:{}", closed_port()))
        .retry_config(RetryConfig::disabled())
        .build();
    SnsNotifier::new(aws_sdk_sns::Client::from_conf(config))
}

#[tokio::test]
async fn test_expiring_in_ten_days_notifies_once() {
    let server = spawn_tls_server(10).await;
    let notifier = Recorder::default();
    let check = Check::new(
        settings(server.port, 30),
        TlsProbe::new(TlsConfig::default()),
        notifier.clone(),
    );

    let report = check.run().await.unwrap();

    assert_eq!(report.days_left, 10);
    assert_eq!(report.evaluation, Evaluation::ExpiringSoon);
    assert!(matches!(report.outcome, Outcome::Notified { .. }));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    let n = sent.first().unwrap();
    assert_eq!(n.subject, "localhost Certificate Expiring Soon");
    assert_eq!(
        n.message,
        format!(
            "localhost certificate will expire in 10 days on {}.",
            report.valid_to
        )
    );
    assert_eq!(n.topic_arn, ARN);
}

#[tokio::test]
async fn test_expiring_in_ninety_days_skips() {
    let server = spawn_tls_server(90).await;
    let notifier = Recorder::default();
    let check = Check::new(
        settings(server.port, 30),
        TlsProbe::default(),
        notifier.clone(),
    );

    let report = check.run().await.unwrap();

    assert_eq!(report.days_left, 90);
    assert_eq!(report.outcome, Outcome::Skipped);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_expired_certificate_notifies() {
    let server = spawn_tls_server(-2).await;
    let notifier = Recorder::default();
    let check = Check::new(
        settings(server.port, 30),
        TlsProbe::default(),
        notifier.clone(),
    );

    let report = check.run().await.unwrap();

    assert_eq!(report.days_left, -2);
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_unreachable_host_fails_without_notifying() {
    let notifier = Recorder::default();
    let check = Check::new(
        settings(closed_port(), 30),
        TlsProbe::default(),
        notifier.clone(),
    );

    let err = check.run().await.unwrap_err();

    assert!(matches!(err, Error::Connection { .. }));
    assert!(err.to_string().contains("localhost"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_sns_failure_does_not_fail_the_check() {
    let server = spawn_tls_server(5).await;
    let check = Check::new(
        settings(server.port, 30),
        TlsProbe::default(),
        unreachable_sns(),
    );

    let report = check.run().await.unwrap();

    assert_eq!(report.days_left, 5);
    assert!(matches!(
        report.outcome,
        Outcome::NotificationFailed { .. }
    ));
}

#[tokio::test]
async fn test_sns_not_called_when_healthy() {
    let server = spawn_tls_server(120).await;
    let check = Check::new(
        settings(server.port, 30),
        TlsProbe::default(),
        unreachable_sns(),
    );

    let report = check.run().await.unwrap();

    assert_eq!(report.outcome, Outcome::Skipped);
}

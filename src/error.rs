use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a certificate check
#[derive(Debug, Error)]
pub enum Error {
    /// A required setting is absent or empty
    #[error("{0} not defined.")]
    MissingConfig(&'static str),

    /// A setting is present but cannot be parsed
    #[error("{name} must be an integer, got {value:?}")]
    InvalidConfig { name: &'static str, value: String },

    /// The TLS client cannot be set up (unreadable or invalid CA bundle)
    #[error("invalid TLS configuration: {0}")]
    TlsConfig(String),

    /// The certificate could not be fetched (DNS, refused, handshake, parse)
    #[error("failed to fetch certificate from {host}:{port}: {reason}")]
    Connection {
        host: String,
        port: u16,
        reason: String,
    },

    /// Publishing the notification failed
    #[error("failed to publish notification: {0}")]
    Notification(String),
}

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use x509_parser::{
    prelude::{FromDer, X509Certificate},
    time::ASN1Time,
};

/// Format of the peer certificate `valid_to` field as OpenSSL renders it
pub const VALID_TO_FORMAT: &str = "%b %e %H:%M:%S %Y GMT";

/// Leaf certificate fields read once per check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSnapshot {
    /// Certificate subject DN
    pub subject: String,
    /// Certificate issuer DN
    pub issuer: String,
    /// Serial number, hex encoded
    pub serial: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
}

impl CertificateSnapshot {
    /// Parse a DER-encoded certificate
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate cannot be parsed or its validity
    /// dates are out of range
    pub fn from_der(cert_der: &[u8]) -> Result<Self> {
        let (_, cert) = X509Certificate::from_der(cert_der)
            .map_err(|e| anyhow!("failed to parse certificate: {e}"))?;

        let validity = cert.validity();

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: to_utc(&validity.not_before)?,
            not_after: to_utc(&validity.not_after)?,
        })
    }

    /// Expiry date, e.g. `Mar  5 12:00:00 2027 GMT`
    #[must_use]
    pub fn valid_to(&self) -> String {
        self.not_after.format(VALID_TO_FORMAT).to_string()
    }
}

fn to_utc(time: &ASN1Time) -> Result<DateTime<Utc>> {
    let raw = time.to_datetime();
    DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
        .ok_or_else(|| anyhow!("invalid certificate timestamp"))
}

//! TLS certificate fetching
//!
//! Opens one TLS connection to the target host, reads the leaf certificate
//! the peer presents and closes the connection again.
//!
//! # Module Organization
//!
//! - `config` - TLS configuration and modes
//! - `metadata` - Certificate snapshot read from the handshake
//! - `probe` - Certificate probing and the `CertificateFetcher` seam
//! - `verifier` - Verifier used when the chain is not validated
//!
//! # Example
//!
//! ```rust,ignore
//! use certpulse::tls::{CertificateFetcher, TlsConfig, TlsProbe};
//!
//! let probe = TlsProbe::new(TlsConfig::default());
//! let snapshot = probe.fetch("example.com", 443).await?;
//! println!("{} expires {}", snapshot.subject, snapshot.valid_to());
//! ```

pub mod config;
pub mod metadata;
pub mod probe;
pub mod verifier;

// Re-export commonly used types
pub use config::{TlsConfig, TlsMode};
pub use metadata::CertificateSnapshot;
pub use probe::{
    CertificateFetcher, DEFAULT_PORT, TlsProbe, ensure_crypto_provider, probe_certificate,
};
pub use verifier::NoVerifier;

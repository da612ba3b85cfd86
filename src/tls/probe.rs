use super::{CertificateSnapshot, NoVerifier, TlsConfig, TlsMode};
use crate::error::Error;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rustls::{
    ClientConfig, RootCertStore,
    pki_types::{CertificateDer, ServerName},
};
use rustls_pemfile::certs;
use std::{
    io::Cursor,
    net::IpAddr,
    path::Path,
    sync::{Arc, OnceLock},
};
use tokio::{fs, io::AsyncWriteExt, net::TcpStream};
use tokio_rustls::{TlsConnector, client::TlsStream};
use tracing::debug;

/// Standard HTTPS port
pub const DEFAULT_PORT: u16 = 443;

static CRYPTO_PROVIDER_INIT: OnceLock<()> = OnceLock::new();

/// Ensure the rustls crypto provider is initialized
///
/// This should be called before any TLS operations. It's safe to call
/// multiple times as initialization only happens once.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER_INIT.get_or_init(|| {
        // Err means another provider is already installed, which is fine
        if let Err(err) = rustls::crypto::ring::default_provider().install_default() {
            debug!("rustls crypto provider already installed: {err:?}");
        }
    });
}

/// Source of the peer leaf certificate
#[async_trait]
pub trait CertificateFetcher: Send + Sync {
    /// Fetch the leaf certificate presented by `host:port`
    ///
    /// # Errors
    ///
    /// Returns `Error::TlsConfig` if the TLS client cannot be set up, and
    /// `Error::Connection` if the certificate cannot be obtained
    async fn fetch(&self, host: &str, port: u16) -> Result<CertificateSnapshot, Error>;
}

/// Fetches certificates with a single TLS handshake per call
#[derive(Debug, Clone, Default)]
pub struct TlsProbe {
    tls: TlsConfig,
}

impl TlsProbe {
    #[must_use]
    pub const fn new(tls: TlsConfig) -> Self {
        Self { tls }
    }
}

#[async_trait]
impl CertificateFetcher for TlsProbe {
    async fn fetch(&self, host: &str, port: u16) -> Result<CertificateSnapshot, Error> {
        let connector = build_tls_connector(&self.tls)
            .await
            .map_err(|e| Error::TlsConfig(format!("{e:#}")))?;

        fetch_leaf_certificate(&connector, host, port)
            .await
            .map_err(|e| Error::Connection {
                host: host.to_string(),
                port,
                reason: format!("{e:#}"),
            })
    }
}

/// Perform a TLS handshake and extract the leaf certificate.
///
/// # Errors
///
/// Returns an error if the TLS client cannot be built, or if the TCP
/// connection, TLS handshake, or certificate parsing fails, or if the peer
/// presents no certificate.
pub async fn probe_certificate(
    host: &str,
    port: u16,
    tls: &TlsConfig,
) -> Result<CertificateSnapshot> {
    let connector = build_tls_connector(tls)
        .await
        .context("failed to build TLS connector")?;

    fetch_leaf_certificate(&connector, host, port).await
}

async fn fetch_leaf_certificate(
    connector: &TlsConnector,
    host: &str,
    port: u16,
) -> Result<CertificateSnapshot> {
    let server_name = server_name_from_host(host)
        .with_context(|| format!("invalid server name for TLS probe: {host}"))?;

    let stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("failed to connect to {host}:{port}"))?;

    let mut tls_stream = connector
        .connect(server_name, stream)
        .await
        .with_context(|| format!("failed to complete TLS handshake with {host}:{port}"))?;

    let snapshot = extract_leaf_certificate(&tls_stream)
        .context("failed to extract certificate from TLS stream")?;

    // close_notify, the peer may already be gone
    if let Err(err) = tls_stream.shutdown().await {
        debug!("TLS shutdown with {host}:{port} failed: {err}");
    }

    debug!(
        subject = %snapshot.subject,
        issuer = %snapshot.issuer,
        not_after = %snapshot.not_after,
        "fetched certificate from {host}:{port}"
    );

    Ok(snapshot)
}

async fn build_tls_connector(tls: &TlsConfig) -> Result<TlsConnector> {
    ensure_crypto_provider();

    let config = match tls.mode {
        TlsMode::Require => ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth(),
        TlsMode::VerifyFull => {
            let roots = match &tls.ca {
                Some(path) => load_root_store(path).await?,
                None => webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect(),
            };
            ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth()
        }
    };

    Ok(TlsConnector::from(Arc::new(config)))
}

async fn load_root_store(path: &Path) -> Result<RootCertStore> {
    let mut store = RootCertStore::empty();
    for cert in load_cert_chain(path).await? {
        store
            .add(cert)
            .with_context(|| format!("invalid CA certificate in {}", path.display()))?;
    }
    Ok(store)
}

async fn load_cert_chain(path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("failed to read certificate {}", path.display()))?;
    let mut reader = Cursor::new(data);
    let parsed = certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| anyhow!("invalid certificate PEM: {e}"))?;

    if parsed.is_empty() {
        anyhow::bail!("no certificates found in {}", path.display());
    }

    Ok(parsed)
}

fn server_name_from_host(host: &str) -> Result<ServerName<'static>> {
    host.parse::<IpAddr>().map_or_else(
        |_| {
            ServerName::try_from(host.to_string())
                .map_err(|_| anyhow!("invalid server name: {host}"))
        },
        |ip| Ok(ServerName::from(ip).to_owned()),
    )
}

fn extract_leaf_certificate(stream: &TlsStream<TcpStream>) -> Result<CertificateSnapshot> {
    let (_, connection) = stream.get_ref();
    let leaf = connection
        .peer_certificates()
        .and_then(|certs| certs.first())
        .context("peer presented no certificate")?;

    CertificateSnapshot::from_der(leaf.as_ref())
}

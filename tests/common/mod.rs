#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use certpulse::{
    Settings,
    tls::{TlsConfig, TlsMode, ensure_crypto_provider},
};
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, Issuer, KeyPair};
use rustls::{
    ServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
};
use std::{path::PathBuf, sync::Arc};
use time::{Duration, OffsetDateTime};
use tokio::{io::AsyncReadExt, net::TcpListener, task::JoinHandle};
use tokio_rustls::TlsAcceptor;

pub const ARN: &str = "arn:aws:sns:us-east-1:000000000000:certs";

/// Certificate chain for `localhost` signed by a throwaway CA
pub struct TestPki {
    pub ca_pem: String,
    pub leaf: CertificateDer<'static>,
    pub key: PrivateKeyDer<'static>,
    pub not_after: OffsetDateTime,
}

/// Build a CA and a `localhost` leaf that expires `days` days (plus one
/// hour, so the whole-day count is stable) from now
pub fn test_pki(days: i64) -> TestPki {
    let mut ca_params = CertificateParams::new(Vec::default()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "certpulse test CA");
    ca_params.distinguished_name = dn;
    let ca_key = KeyPair::generate().unwrap();
    let ca_cert = ca_params.clone().self_signed(&ca_key).unwrap();
    let issuer = Issuer::new(ca_params, ca_key);

    let not_after = OffsetDateTime::now_utc() + Duration::days(days) + Duration::hours(1);
    let mut params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "localhost");
    params.distinguished_name = dn;
    params.not_before = not_after - Duration::days(365);
    params.not_after = not_after;

    let key = KeyPair::generate().unwrap();
    let leaf = params.signed_by(&key, &issuer).unwrap();

    TestPki {
        ca_pem: ca_cert.pem(),
        leaf: leaf.der().clone(),
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
        not_after,
    }
}

/// Local TLS server presenting a `TestPki` leaf on 127.0.0.1
pub struct TestServer {
    pub port: u16,
    pub pki: TestPki,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_tls_server(days: i64) -> TestServer {
    ensure_crypto_provider();

    let pki = test_pki(days);
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![pki.leaf.clone()], pki.key.clone_key())
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    // hold the connection until the client closes it
                    let mut buf = [0u8; 1];
                    let _ = tls.read(&mut buf).await;
                }
            });
        }
    });

    TestServer { port, pki, handle }
}

/// Port with nothing listening on it
pub fn closed_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

/// Write the CA PEM to a file unique to this server
pub fn write_ca(server: &TestServer) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "certpulse-test-ca-{}-{}.pem",
        std::process::id(),
        server.port
    ));
    std::fs::write(&path, &server.pki.ca_pem).unwrap();
    path
}

pub fn settings(port: u16, days_buffer: i64) -> Settings {
    Settings {
        domain: "localhost".to_string(),
        port,
        topic_arn: ARN.to_string(),
        days_buffer,
    }
}

pub fn verify_full(ca: PathBuf) -> TlsConfig {
    TlsConfig {
        mode: TlsMode::VerifyFull,
        ca: Some(ca),
    }
}

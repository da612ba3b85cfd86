use std::{path::PathBuf, str::FromStr};

/// TLS configuration used when probing the peer certificate
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub ca: Option<PathBuf>,
}

/// How much the probe trusts the peer before reading its certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Complete the handshake without certificate verification
    #[default]
    Require,
    /// Verify certificate chain and hostname
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "require" => Ok(Self::Require),
            "verify-full" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl TlsMode {
    /// Check if the peer chain is validated during the handshake
    #[must_use]
    pub const fn verifies(&self) -> bool {
        matches!(self, Self::VerifyFull)
    }
}

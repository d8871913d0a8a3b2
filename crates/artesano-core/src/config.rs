// ── Runtime connection configuration ──
//
// Describes *how* to reach the catalog backend. Never touches disk: the
// CLI/TUI builds a `CatalogConfig` (usually via artesano-config) and hands
// it in.

use std::time::Duration;

use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging certificates).
    DangerAcceptInvalid,
}

/// Configuration for talking to one catalog backend.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Backend base URL (e.g. `http://localhost:8080`).
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub tls: TlsVerification,
}

impl CatalogConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
        }
    }

    /// Parse `raw` as the base URL.
    pub fn from_url(raw: &str) -> Result<Self, crate::CoreError> {
        let base_url = Url::parse(raw).map_err(|e| crate::CoreError::Config {
            message: format!("invalid backend URL \"{raw}\": {e}"),
        })?;
        Ok(Self::new(base_url))
    }
}

// ── Runtime backend configuration ──
//
// These types describe *how* to reach the tunnel backend. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `BackendConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::completion::DEFAULT_COMPLETION_TIMEOUT;
use crate::model::ProducerId;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (lab backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to one tunnel backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL (e.g., `https://onos.lab:8181/tunnels`).
    pub url: Url,
    /// API key sent as `X-API-KEY`, if the backend wants one.
    pub api_key: Option<SecretString>,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout for provisioning calls.
    pub timeout: Duration,
    /// Upper bound for the inventory query on the completion path.
    pub completion_timeout: Duration,
    /// Owning identity stamped on descriptors.
    pub producer: ProducerId,
}

impl BackendConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            api_key: None,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            producer: ProducerId::default(),
        }
    }
}

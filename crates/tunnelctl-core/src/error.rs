// ── Core error types ──
//
// User-facing errors from tunnelctl-core. Validation variants are raised
// locally before any backend call; backend variants are translated from
// `tunnelctl_api::Error` so consumers never handle reqwest types directly.

use thiserror::Error;

use crate::codec::EndpointError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation errors ────────────────────────────────────────────
    #[error("Unknown tunnel type '{tag}' (expected one of: {valid})")]
    UnknownTunnelType { tag: String, valid: String },

    #[error("Invalid {field} address '{raw}'")]
    InvalidAddress { field: String, raw: String },

    #[error("Invalid {field} optical endpoint '{raw}': {reason}")]
    InvalidOpticalEndpoint {
        field: String,
        raw: String,
        reason: String,
    },

    #[error("Invalid group id '{raw}': expected a non-negative integer")]
    InvalidGroupId { raw: String },

    // ── Backend errors ───────────────────────────────────────────────
    #[error("Tunnel creation failed: {message}")]
    CreationService {
        message: String,
        /// Backend error code, when the backend sent one.
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Instance port query failed: {message}")]
    InventoryQuery { message: String },

    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Backend error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Attach the field name (`src` / `dst`) to an endpoint parse failure.
    pub fn endpoint(field: &str, err: EndpointError) -> Self {
        match err {
            EndpointError::InvalidAddress { raw } => Self::InvalidAddress {
                field: field.into(),
                raw,
            },
            EndpointError::InvalidOpticalEndpoint { raw, reason } => {
                Self::InvalidOpticalEndpoint {
                    field: field.into(),
                    raw,
                    reason: reason.to_string(),
                }
            }
        }
    }

    /// Returns `true` for errors detected locally, before any backend call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownTunnelType { .. }
                | Self::InvalidAddress { .. }
                | Self::InvalidOpticalEndpoint { .. }
                | Self::InvalidGroupId { .. }
        )
    }

    /// Wrap any failure of the tunnel-creation call.
    pub fn creation(err: tunnelctl_api::Error) -> Self {
        match CoreError::from(err) {
            Self::Api {
                message,
                code,
                status,
            } => Self::CreationService {
                message,
                code,
                status,
            },
            other => Self::CreationService {
                message: other.to_string(),
                code: None,
                status: None,
            },
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tunnelctl_api::Error> for CoreError {
    fn from(err: tunnelctl_api::Error) -> Self {
        match err {
            tunnelctl_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            tunnelctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            tunnelctl_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            tunnelctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tunnelctl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            tunnelctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            tunnelctl_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            tunnelctl_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
                code: None,
                status: None,
            },
        }
    }
}

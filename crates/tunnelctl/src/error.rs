//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tunnelctl_config::ConfigError;
use tunnelctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(code(tunnelctl::validation))]
    Validation { field: String, reason: String },

    /// Rejected operator input. The message names the field and the value.
    #[error("{message}")]
    #[diagnostic(
        code(tunnelctl::invalid_input),
        help("Check the <{field}> argument. Nothing was sent to the backend.")
    )]
    InvalidInput { field: String, message: String },

    #[error("{message}")]
    #[diagnostic(
        code(tunnelctl::unknown_type),
        help("Run: tunnelctl types to see supported tunnel types")
    )]
    UnknownType { message: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Tunnel creation failed: {message}")]
    #[diagnostic(
        code(tunnelctl::creation_failed),
        help("The backend returned {status}. Nothing was created.")
    )]
    CreationFailed { message: String, status: String },

    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(tunnelctl::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Use --insecure (-k) for self-signed certificates."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(tunnelctl::auth_failed),
        help(
            "Verify the API key for this profile.\n\
             Pass --api-key, set TUNNELCTL_API_KEY, or run: tunnelctl config init"
        )
    )]
    AuthFailed { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(tunnelctl::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    #[error("Backend error ({code}): {message}")]
    #[diagnostic(code(tunnelctl::api_error))]
    ApiError { code: String, message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tunnelctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tunnelctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(tunnelctl::no_config),
        help(
            "Create a profile with: tunnelctl config init\n\
             Or pass --endpoint / set TUNNELCTL_ENDPOINT.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(tunnelctl::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(tunnelctl::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(tunnelctl::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } | Self::InvalidInput { .. } | Self::UnknownType { .. } => {
                exit_code::USAGE
            }
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::UnknownTunnelType { .. } => CliError::UnknownType { message },

            CoreError::InvalidAddress { field, .. }
            | CoreError::InvalidOpticalEndpoint { field, .. } => {
                CliError::InvalidInput { field, message }
            }

            CoreError::InvalidGroupId { .. } => CliError::InvalidInput {
                field: "group-id".into(),
                message,
            },

            CoreError::CreationService {
                message, status, ..
            } => CliError::CreationFailed {
                message,
                status: status.map_or_else(|| "no status".into(), |s| format!("HTTP {s}")),
            },

            CoreError::InventoryQuery { message } => CliError::ApiError {
                code: "inventory".into(),
                message,
            },

            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::Api { message, code, .. } => CliError::ApiError {
                code: code.unwrap_or_else(|| "unknown".into()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "endpoint".into(),
                reason: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_exit_with_usage() {
        let err = CliError::from(CoreError::InvalidGroupId { raw: "-1".into() });
        assert_eq!(err.exit_code(), exit_code::USAGE);
        assert!(err.to_string().contains("'-1'"));

        let err = CliError::from(CoreError::UnknownTunnelType {
            tag: "ATM".into(),
            valid: "MPLS".into(),
        });
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn backend_errors_keep_their_exit_codes() {
        let err = CliError::from(CoreError::Timeout { timeout_secs: 3 });
        assert_eq!(err.exit_code(), exit_code::TIMEOUT);

        let err = CliError::from(CoreError::AuthenticationFailed {
            message: "bad key".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let err = CliError::from(CoreError::CreationService {
            message: "duplicate".into(),
            code: None,
            status: Some(409),
        });
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}

//! Configuration for tunnelctl.
//!
//! TOML profiles, API key resolution (env + keyring + plaintext), and
//! translation to `tunnelctl_core::BackendConfig`. The CLI adds
//! `GlobalOpts`-aware overrides on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tunnelctl_core::{BackendConfig, ProducerId, TlsVerification};

/// Keyring service name under which API keys are stored.
pub const KEYRING_SERVICE: &str = "tunnelctl";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is given explicitly.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    /// Provisioning request timeout, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Upper bound for the inventory query made while completing.
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: u64,

    /// Instance-port identifiers always offered by the completer.
    #[serde(default)]
    pub completion_candidates: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            completion_timeout_ms: default_completion_timeout_ms(),
            completion_candidates: Vec::new(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_completion_timeout_ms() -> u64 {
    u64::try_from(tunnelctl_core::DEFAULT_COMPLETION_TIMEOUT.as_millis()).unwrap_or(2000)
}

/// A named backend profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "https://onos.lab:8181/tunnels").
    pub endpoint: String,

    /// API key (plaintext, prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Path to custom CA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Producer scheme stamped on created tunnels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_scheme: Option<String>,

    /// Producer id stamped on created tunnels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer_id: Option<String>,
}

impl Profile {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Producer identity, falling back to the built-in default per part.
    pub fn producer(&self) -> ProducerId {
        ProducerId::new(
            self.producer_scheme
                .as_deref()
                .unwrap_or(ProducerId::DEFAULT_SCHEME),
            self.producer_id.as_deref().unwrap_or(ProducerId::DEFAULT_ID),
        )
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "tunnelctl", "tunnelctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("tunnelctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path + environment. A missing file is fine.
///
/// Nested keys use a double underscore:
/// `TUNNELCTL_DEFAULTS__COMPLETION_TIMEOUT_MS=500`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("TUNNELCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Which credential stores a lookup may consult.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeySources {
    /// Env var, system keyring, then plaintext.
    #[default]
    All,
    /// Env var and plaintext only. The keyring call is synchronous and
    /// unbounded, so latency-bound paths skip it.
    SkipKeyring,
}

/// Resolve an API key from the credential chain (no CLI flag step).
///
/// The backend may not require a key at all, so running out of sources
/// is `None`, not an error.
pub fn resolve_api_key(
    profile: &Profile,
    profile_name: &str,
    sources: KeySources,
) -> Option<SecretString> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if sources == KeySources::All {
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name)) {
            if let Ok(secret) = entry.get_password() {
                return Some(SecretString::from(secret));
            }
        }
    }

    // 3. Plaintext in config
    profile
        .api_key
        .as_ref()
        .map(|key| SecretString::from(key.clone()))
}

/// Store an API key in the system keyring for `profile_name`.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &keyring_user(profile_name))
        .and_then(|entry| entry.set_password(key))
        .map_err(|e| ConfigError::Validation {
            field: "api_key".into(),
            reason: format!("keyring store failed: {e}"),
        })
}

fn keyring_user(profile_name: &str) -> String {
    format!("{profile_name}/api-key")
}

/// Parse a profile's endpoint URL.
pub fn parse_endpoint(raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a `BackendConfig` from a profile and the global defaults, with
/// no CLI flag overrides.
pub fn profile_to_backend_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    sources: KeySources,
) -> Result<BackendConfig, ConfigError> {
    let url = parse_endpoint(&profile.endpoint)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(BackendConfig {
        url,
        api_key: resolve_api_key(profile, profile_name, sources),
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        completion_timeout: Duration::from_millis(defaults.completion_timeout_ms),
        producer: profile.producer(),
    })
}

//! `GlobalOpts`-aware configuration resolution.
//!
//! Profile loading and credential lookup live in `tunnelctl-config`; this
//! module layers CLI flags on top and produces a `BackendConfig`.

use std::time::Duration;

use secrecy::SecretString;

use tunnelctl_config::{Config, KeySources, Profile};
use tunnelctl_core::{BackendConfig, ProducerId, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use tunnelctl_config::{config_path, load_config, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Build a `BackendConfig` from the config file, the active profile and CLI
/// overrides (flag > env > profile > defaults).
pub fn resolve_backend(global: &GlobalOpts, cfg: &Config) -> Result<BackendConfig, CliError> {
    resolve_backend_with(global, cfg, KeySources::All)
}

/// [`resolve_backend`] restricted to the given credential stores.
pub fn resolve_backend_with(
    global: &GlobalOpts,
    cfg: &Config,
    sources: KeySources,
) -> Result<BackendConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, cfg, sources);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(profile_not_found(profile_name, cfg));
    }

    // No profile -- build from CLI flags / env vars alone.
    let endpoint = global.endpoint.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;

    let mut backend = BackendConfig::new(tunnelctl_config::parse_endpoint(endpoint)?);
    backend.api_key = global.api_key.clone().map(SecretString::from);
    backend.tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    backend.timeout = Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout));
    backend.completion_timeout = Duration::from_millis(cfg.defaults.completion_timeout_ms);
    backend.producer = ProducerId::default();
    Ok(backend)
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    cfg: &Config,
    sources: KeySources,
) -> Result<BackendConfig, CliError> {
    let mut backend =
        tunnelctl_config::profile_to_backend_config(profile, profile_name, &cfg.defaults, sources)?;

    if let Some(ref endpoint) = global.endpoint {
        backend.url = tunnelctl_config::parse_endpoint(endpoint)?;
    }
    if let Some(ref key) = global.api_key {
        backend.api_key = Some(SecretString::from(key.clone()));
    }
    if global.insecure {
        backend.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        backend.timeout = Duration::from_secs(secs);
    }
    Ok(backend)
}

/// Producer identity for the active profile, or the default one.
pub fn active_producer(global: &GlobalOpts, cfg: &Config) -> ProducerId {
    cfg.profiles
        .get(&active_profile_name(global, cfg))
        .map_or_else(ProducerId::default, Profile::producer)
}

pub fn profile_not_found(name: String, cfg: &Config) -> CliError {
    let available: Vec<_> = cfg.profiles.keys().cloned().collect();
    CliError::ProfileNotFound {
        name,
        available: if available.is_empty() {
            "(none)".into()
        } else {
            available.join(", ")
        },
    }
}

//! Config subcommand handlers.

use dialoguer::{Input, Select};

use tunnelctl_config::{Config, Defaults, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> CliError {
    CliError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Copy of the config with plaintext API keys masked.
fn redacted(cfg: &Config) -> Config {
    let mut shown = cfg.clone();
    for profile in shown.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some("********".into());
        }
    }
    shown
}

const PROFILE_KEYS: &str = "endpoint, api_key, api_key_env, ca_cert, insecure, timeout, \
                            producer_scheme, producer_id";
const DEFAULTS_KEYS: &str = "defaults.output, defaults.insecure, defaults.timeout, \
                             defaults.completion_timeout_ms, defaults.completion_candidates";

fn set_profile_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "endpoint" => {
            tunnelctl_config::parse_endpoint(&value)?;
            profile.endpoint = value;
        }
        "api_key" | "api-key" => profile.api_key = Some(value),
        "api_key_env" | "api-key-env" => profile.api_key_env = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(
                value
                    .parse()
                    .map_err(|_| invalid("insecure", "must be 'true' or 'false'"))?,
            );
        }
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| invalid("timeout", "must be a number (seconds)"))?,
            );
        }
        "producer_scheme" | "producer-scheme" => profile.producer_scheme = Some(value),
        "producer_id" | "producer-id" => profile.producer_id = Some(value),
        other => {
            return Err(invalid(
                other,
                format!("unknown config key '{other}'. Valid keys: {PROFILE_KEYS}, {DEFAULTS_KEYS}"),
            ));
        }
    }
    Ok(())
}

fn set_defaults_key(defaults: &mut Defaults, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "output" => defaults.output = value,
        "insecure" => {
            defaults.insecure = value
                .parse()
                .map_err(|_| invalid("defaults.insecure", "must be 'true' or 'false'"))?;
        }
        "timeout" => {
            defaults.timeout = value
                .parse()
                .map_err(|_| invalid("defaults.timeout", "must be a number (seconds)"))?;
        }
        "completion_timeout_ms" | "completion-timeout-ms" => {
            defaults.completion_timeout_ms = value.parse().map_err(|_| {
                invalid(
                    "defaults.completion_timeout_ms",
                    "must be a number (milliseconds)",
                )
            })?;
        }
        "completion_candidates" | "completion-candidates" => {
            defaults.completion_candidates = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect();
        }
        other => {
            return Err(invalid(
                &format!("defaults.{other}"),
                format!("unknown defaults key. Valid keys: {DEFAULTS_KEYS}"),
            ));
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("tunnelctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Backend URL
            let endpoint: String = Input::new()
                .with_prompt("Backend URL")
                .default("http://127.0.0.1:8181/tunnels".into())
                .validate_with(|v: &String| {
                    tunnelctl_config::parse_endpoint(v)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(endpoint);

            // 3. API key (optional)
            let key = rpassword::prompt_password("API key (leave empty for none): ")
                .map_err(prompt_err)?;

            if !key.is_empty() {
                let store_choices = &[
                    "Store in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the API key?")
                    .items(store_choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;

                if store_selection == 0 {
                    tunnelctl_config::store_api_key(&profile_name, &key)?;
                    eprintln!("   API key stored in system keyring");
                } else {
                    profile.api_key = Some(key);
                }
            }

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            let path = config::save_config(&cfg)?;

            eprintln!("\nConfiguration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: tunnelctl ports list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n({e})")),
                |c| c.active_profile_name().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();

            if let Some(defaults_key) = key.strip_prefix("defaults.") {
                set_defaults_key(&mut cfg.defaults, defaults_key, value)?;
                config::save_config(&cfg)?;
                eprintln!("Set {key}");
                return Ok(());
            }

            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: tunnelctl config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.endpoint);
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(config::profile_not_found(name, &cfg));
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }
    }
}

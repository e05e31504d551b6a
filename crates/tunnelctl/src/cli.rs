//! Clap derive structures for the `tunnelctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tunnelctl -- provision tunnels and complete instance-port identifiers
#[derive(Debug, Parser)]
#[command(
    name = "tunnelctl",
    version,
    about = "Provision network tunnels from the command line",
    long_about = "Create MPLS, VLAN, VXLAN, GRE, ODUK and OCH tunnels on a tunnel \
        provisioning backend,\nand complete instance-port identifiers for interactive shells.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "TUNNELCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 'e', env = "TUNNELCTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Backend API key
    #[arg(long, env = "TUNNELCTL_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TUNNELCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TUNNELCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TUNNELCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a tunnel between two endpoints
    #[command(alias = "c")]
    Create(CreateArgs),

    /// Print completion candidates (shell completion host entrypoint)
    Complete(CompleteArgs),

    /// Inspect instance ports
    Ports(PortsArgs),

    /// List supported tunnel types
    Types,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Create ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Source endpoint: an IP address, or DEVICE-PORT for ODUK/OCH
    pub src: String,

    /// Destination endpoint, same form as the source
    pub dst: String,

    /// Tunnel type: MPLS, VLAN, VXLAN, GRE, ODUK or OCH
    #[arg(value_name = "TYPE")]
    pub tunnel_type: String,

    /// Tunnel group id (non-negative integer)
    #[arg(allow_hyphen_values = true)]
    pub group_id: String,

    /// Optional tunnel name
    #[arg(value_name = "TUNNEL_NAME")]
    pub name: Option<String>,

    /// Bandwidth annotation, recorded verbatim (default: 0)
    pub bandwidth: Option<String>,

    /// Build and print the descriptor without submitting it
    #[arg(long)]
    pub dry_run: bool,
}

// ── Complete ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompleteArgs {
    #[command(subcommand)]
    pub target: CompleteTarget,
}

#[derive(Debug, Subcommand)]
pub enum CompleteTarget {
    /// Complete an instance-port identifier
    InstancePort {
        /// Partial input typed so far
        #[arg(default_value = "", allow_hyphen_values = true)]
        buffer: String,

        /// Cursor position in bytes (defaults to the end of the buffer)
        #[arg(long)]
        cursor: Option<usize>,
    },
}

// ── Ports ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PortsArgs {
    #[command(subcommand)]
    pub command: PortsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortsCommand {
    /// List instance ports known to the backend
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Config key (e.g., "endpoint", "producer_id", "defaults.completion_timeout_ms")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

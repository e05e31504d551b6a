//! Instance-port command handlers.

use tabled::Tabled;
use tunnelctl_core::{InstancePort, RemoteBackend};

use crate::cli::{GlobalOpts, PortsArgs, PortsCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PortRow {
    #[tabled(rename = "Port ID")]
    port_id: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "State")]
    state: String,
}

impl From<&InstancePort> for PortRow {
    fn from(p: &InstancePort) -> Self {
        let or_dash = |v: Option<&str>| v.unwrap_or("-").to_owned();
        Self {
            port_id: p.port_id.clone(),
            device: or_dash(p.device_id.as_deref()),
            ip: or_dash(p.ip_address.as_deref()),
            mac: or_dash(p.mac_address.as_deref()),
            network: or_dash(p.network_id.as_deref()),
            state: p
                .state
                .as_deref()
                .map_or_else(|| "-".into(), output::paint_state),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: PortsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PortsCommand::List => {
            let cfg = config::load_config()?;
            let backend = RemoteBackend::connect(config::resolve_backend(global, &cfg)?)?;
            let ports = backend.instance_ports().await?;

            let out = output::render_list(
                &global.output,
                &ports,
                |p| PortRow::from(p),
                |p| p.port_id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

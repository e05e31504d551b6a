//! `create`: build a tunnel descriptor and submit it to the backend.

use serde::Serialize;

use tunnelctl_core::{
    Endpoint, RemoteBackend, TunnelDescriptor, TunnelDescriptorBuilder, TunnelRequest,
    TunnelTypeRegistry,
};

use crate::cli::{CreateArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Created<'a> {
    tunnel_id: &'a str,
    descriptor: &'a TunnelDescriptor,
}

impl From<CreateArgs> for TunnelRequest {
    fn from(args: CreateArgs) -> Self {
        TunnelRequest {
            src: args.src,
            dst: args.dst,
            tunnel_type: args.tunnel_type,
            group_id: args.group_id,
            name: args.name,
            bandwidth: args.bandwidth,
        }
    }
}

pub async fn handle(args: CreateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let dry_run = args.dry_run;
    let request = TunnelRequest::from(args);

    // Reject bad input before touching config or the network.
    TunnelDescriptorBuilder::new(&TunnelTypeRegistry::default()).build(&request)?;

    let cfg = config::load_config()?;

    if dry_run {
        let registry = TunnelTypeRegistry::new(config::active_producer(global, &cfg));
        let descriptor = TunnelDescriptorBuilder::new(&registry).build(&request)?;
        let out = output::render_single(&global.output, &descriptor, detail, |d| {
            d.tunnel_type().to_string()
        })?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let backend = RemoteBackend::connect(config::resolve_backend(global, &cfg)?)?;
    let provisioner = backend.provisioner();

    let descriptor = provisioner.prepare(&request)?;
    let id = provisioner.submit(&descriptor).await?;

    let created = Created {
        tunnel_id: id.as_str(),
        descriptor: &descriptor,
    };
    let out = output::render_single(
        &global.output,
        &created,
        |c| format!("The tunnel identity is {}", c.tunnel_id),
        |c| format!("The tunnel identity is {}", c.tunnel_id),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(d: &TunnelDescriptor) -> String {
    let mut lines = vec![
        format!("Type:       {}", d.tunnel_type()),
        format!("Source:     {}", endpoint_detail(d.src())),
        format!("Dest:       {}", endpoint_detail(d.dst())),
        format!("Group:      {}", d.group_id()),
        format!("Producer:   {}", d.producer()),
    ];
    if let Some(name) = d.name() {
        lines.push(format!("Name:       {name}"));
    }
    for (key, value) in d.annotations().iter() {
        lines.push(format!("{:<11} {value}", format!("{key}:")));
    }
    lines.join("\n")
}

fn endpoint_detail(ep: &Endpoint) -> String {
    match ep {
        Endpoint::Ip(_) => ep.to_string(),
        Endpoint::Optical(o) => format!(
            "{ep} ({}, logic id {}{})",
            o.kind.as_str(),
            o.logic_id.get(),
            if o.global { ", global" } else { "" }
        ),
    }
}

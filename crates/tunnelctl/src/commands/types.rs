//! `types`: the supported tunnel types and how their endpoints are written.

use serde::Serialize;
use tabled::Tabled;
use tunnelctl_core::{EndpointFamily, OPTICAL_SEPARATOR, TunnelType};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct TypeInfo {
    #[serde(rename = "type")]
    tunnel_type: TunnelType,
    family: EndpointFamily,
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    tunnel_type: String,
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Endpoint")]
    example: String,
}

impl From<&TypeInfo> for TypeRow {
    fn from(t: &TypeInfo) -> Self {
        let example = match t.family {
            EndpointFamily::Ip => "10.0.0.1 | fd00::1".to_owned(),
            EndpointFamily::Optical => format!("DEVICE{OPTICAL_SEPARATOR}PORT"),
        };
        Self {
            tunnel_type: t.tunnel_type.to_string(),
            family: t.family.to_string(),
            example,
        }
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let types: Vec<TypeInfo> = TunnelType::ALL
        .iter()
        .map(|&tunnel_type| TypeInfo {
            tunnel_type,
            family: tunnel_type.family(),
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &types,
        |t| TypeRow::from(t),
        |t| t.tunnel_type.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

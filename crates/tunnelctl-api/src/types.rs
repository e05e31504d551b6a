// Wire types for the tunnel backend.
//
// These mirror the JSON bodies exactly; core converts its domain types
// into and out of them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Tunnels ─────────────────────────────────────────────────────────

/// Endpoint as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointBody {
    Ip {
        address: String,
    },
    Optical {
        device_id: String,
        port: u64,
        channel: String,
        logic_id: u64,
        global: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerBody {
    pub scheme: String,
    pub id: String,
}

/// `POST v1/tunnels` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTunnelBody {
    pub src: EndpointBody,
    pub dst: EndpointBody,
    #[serde(rename = "type")]
    pub tunnel_type: String,
    pub group_id: u32,
    pub producer: ProducerBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub annotations: IndexMap<String, String>,
}

/// `POST v1/tunnels` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunnelCreatedResponse {
    pub id: String,
}

// ── Instance ports ──────────────────────────────────────────────────

/// One entry of `GET v1/instance-ports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstancePortResponse {
    pub port_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

// ── Tunnel endpoint types ──
//
// One terminus of a tunnel: either a plain network address or a device/port
// pair on optical hardware. The variant always agrees with the endpoint
// family of the tunnel type it belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use super::tunnel_type::EndpointFamily;

// ── ProducerId ──────────────────────────────────────────────────────

/// Identity of the component that owns a tunnel and its optical endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerId {
    pub scheme: String,
    pub id: String,
}

impl ProducerId {
    pub const DEFAULT_SCHEME: &'static str = "default";
    pub const DEFAULT_ID: &'static str = "tunnelctl.provider.tunnel.default";

    pub fn new(scheme: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            id: id.into(),
        }
    }
}

impl Default for ProducerId {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCHEME, Self::DEFAULT_ID)
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.id)
    }
}

// ── Optical identifiers ─────────────────────────────────────────────

/// Identifier of an optical network element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Port number on an optical network element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortNumber(u64);

impl PortNumber {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical channel identifier on an optical port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpticalLogicId(u64);

impl OpticalLogicId {
    /// The logic id every endpoint created by this tool carries.
    pub const DEFAULT: Self = Self(0);

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Optical channel kind. Only lambda switching is provisioned here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpticalChannelKind {
    Lambda,
}

impl OpticalChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lambda => "lambda",
        }
    }
}

// ── Endpoint ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IpEndpoint {
    address: IpAddr,
}

impl IpEndpoint {
    pub fn new(address: IpAddr) -> Self {
        Self { address }
    }

    pub fn addr(&self) -> IpAddr {
        self.address
    }
}

/// Optical endpoint. Device and port are always present; kind, logic id
/// and the global flag are fixed when the endpoint is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpticalEndpoint {
    pub producer: ProducerId,
    pub device: DeviceId,
    pub port: PortNumber,
    pub kind: OpticalChannelKind,
    pub logic_id: OpticalLogicId,
    pub global: bool,
}

impl OpticalEndpoint {
    /// Lambda endpoint with the default logic id, marked globally significant.
    pub fn lambda(producer: ProducerId, device: DeviceId, port: PortNumber) -> Self {
        Self {
            producer,
            device,
            port,
            kind: OpticalChannelKind::Lambda,
            logic_id: OpticalLogicId::DEFAULT,
            global: true,
        }
    }
}

/// Tagged by `family` on the wire so the optical `kind` field stays free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Endpoint {
    Ip(IpEndpoint),
    Optical(OpticalEndpoint),
}

impl Endpoint {
    pub fn family(&self) -> EndpointFamily {
        match self {
            Self::Ip(_) => EndpointFamily::Ip,
            Self::Optical(_) => EndpointFamily::Optical,
        }
    }

    pub fn as_ip(&self) -> Option<&IpEndpoint> {
        match self {
            Self::Ip(ip) => Some(ip),
            Self::Optical(_) => None,
        }
    }

    pub fn as_optical(&self) -> Option<&OpticalEndpoint> {
        match self {
            Self::Optical(o) => Some(o),
            Self::Ip(_) => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(ip) => write!(f, "{}", ip.addr()),
            Self::Optical(o) => write!(f, "{}-{}", o.device, o.port),
        }
    }
}

// ── Domain model ──
//
// Canonical tunnel types shared by the builder, the backend adapter and the
// CLI. Wire shapes live in `tunnelctl-api`; conversion happens in `convert`.

pub mod descriptor;
pub mod endpoint;
pub mod instance_port;
pub mod tunnel_type;

pub use descriptor::{Annotations, GroupId, TunnelDescriptor, TunnelId, TunnelName};
pub use endpoint::{
    DeviceId, Endpoint, IpEndpoint, OpticalChannelKind, OpticalEndpoint, OpticalLogicId,
    PortNumber, ProducerId,
};
pub use instance_port::InstancePort;
pub use tunnel_type::{EndpointFamily, TunnelType};

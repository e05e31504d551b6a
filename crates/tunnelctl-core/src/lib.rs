// tunnelctl-core: Tunnel descriptor construction and instance-port completion
// between tunnelctl-api and the CLI.

pub mod builder;
pub mod codec;
pub mod completion;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod registry;
pub mod remote;
pub mod requests;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use builder::{DEFAULT_BANDWIDTH, TunnelDescriptorBuilder};
pub use codec::{EndpointError, OPTICAL_SEPARATOR, OpticalDefect};
pub use completion::{
    CandidatePool, CandidateSetResolver, DEFAULT_COMPLETION_TIMEOUT, InstancePortCompleter,
};
pub use config::{BackendConfig, TlsVerification};
pub use error::CoreError;
pub use registry::{Resolution, TunnelTypeRegistry};
pub use remote::RemoteBackend;
pub use requests::TunnelRequest;
pub use service::{InstancePortInventory, Provisioner, TunnelCreationService};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Annotations, DeviceId, Endpoint, EndpointFamily, GroupId, InstancePort, IpEndpoint,
    OpticalChannelKind, OpticalEndpoint, OpticalLogicId, PortNumber, ProducerId,
    TunnelDescriptor, TunnelId, TunnelName, TunnelType,
};

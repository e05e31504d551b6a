// tunnelctl-api: Async Rust client for the tunnel provisioning backend

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::BackendClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

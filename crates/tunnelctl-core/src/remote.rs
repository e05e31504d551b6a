// ── Remote backend adapter ──
//
// `RemoteBackend` is the production implementation of both collaborator
// traits. It owns one `BackendClient` and translates between domain types
// and wire bodies on every call.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::debug;
use tunnelctl_api::transport::{TlsMode, TransportConfig};
use tunnelctl_api::types::CreateTunnelBody;
use tunnelctl_api::BackendClient;

use crate::completion::{CandidateSetResolver, InstancePortCompleter};
use crate::config::{BackendConfig, TlsVerification};
use crate::error::CoreError;
use crate::model::{InstancePort, TunnelDescriptor, TunnelId};
use crate::registry::TunnelTypeRegistry;
use crate::service::{InstancePortInventory, Provisioner, TunnelCreationService};

pub struct RemoteBackend {
    client: BackendClient,
    config: BackendConfig,
}

impl RemoteBackend {
    /// Build the HTTP client for `config`. No request is sent.
    pub fn connect(config: BackendConfig) -> Result<Self, CoreError> {
        Self::with_timeout(config.timeout, config)
    }

    /// Same as [`connect`](Self::connect), but every request is bounded by
    /// the completion timeout instead of the provisioning timeout.
    pub fn connect_for_completion(config: BackendConfig) -> Result<Self, CoreError> {
        Self::with_timeout(config.completion_timeout, config)
    }

    fn with_timeout(timeout: Duration, config: BackendConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&config.tls),
            timeout,
        };
        let client = BackendClient::new(config.url.as_str(), config.api_key.as_ref(), &transport)?;
        debug!(url = %client.base_url(), "backend client ready");
        Ok(Self { client, config })
    }

    /// Registry stamped with the configured producer identity.
    pub fn registry(&self) -> TunnelTypeRegistry {
        TunnelTypeRegistry::new(self.config.producer.clone())
    }

    /// Full instance-port records, for listing.
    pub async fn instance_ports(&self) -> Result<Vec<InstancePort>, CoreError> {
        let ports = self
            .client
            .list_instance_ports()
            .await
            .map_err(inventory_error)?;
        Ok(ports.into_iter().map(InstancePort::from).collect())
    }

    /// Provisioning flow backed by this client.
    pub fn provisioner(&self) -> Provisioner<&Self> {
        Provisioner::new(self.registry(), self)
    }

    /// Completion engine backed by this client.
    pub fn completer(&self) -> InstancePortCompleter<&Self> {
        InstancePortCompleter::new(CandidateSetResolver::new(
            self,
            self.config.completion_timeout,
        ))
    }
}

impl TunnelCreationService for RemoteBackend {
    async fn create(&self, descriptor: &TunnelDescriptor) -> Result<TunnelId, CoreError> {
        let body = CreateTunnelBody::from(descriptor);
        let created = self
            .client
            .create_tunnel(&body)
            .await
            .map_err(CoreError::creation)?;
        Ok(TunnelId::new(created.id))
    }
}

impl InstancePortInventory for RemoteBackend {
    async fn list_all(&self) -> Result<BTreeSet<String>, CoreError> {
        let ports = self
            .client
            .list_instance_ports()
            .await
            .map_err(inventory_error)?;
        Ok(ports.into_iter().map(|p| p.port_id).collect())
    }
}

fn inventory_error(err: tunnelctl_api::Error) -> CoreError {
    match CoreError::from(err) {
        e @ (CoreError::AuthenticationFailed { .. } | CoreError::ConnectionFailed { .. }) => e,
        other => CoreError::InventoryQuery {
            message: other.to_string(),
        },
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

// ── External collaborators and the provisioning flow ──
//
// The tunnel backend and the instance-port inventory are injected as
// trait implementations, so tests substitute in-memory doubles and the
// CLI plugs in `RemoteBackend`.

use std::collections::BTreeSet;
use std::future::Future;

use tracing::{debug, info};

use crate::builder::TunnelDescriptorBuilder;
use crate::error::CoreError;
use crate::model::{TunnelDescriptor, TunnelId};
use crate::registry::TunnelTypeRegistry;
use crate::requests::TunnelRequest;

/// Allocates and persists tunnels. The only external write.
pub trait TunnelCreationService {
    fn create(
        &self,
        descriptor: &TunnelDescriptor,
    ) -> impl Future<Output = Result<TunnelId, CoreError>> + Send;
}

/// Source of live instance-port identifiers. Eventually consistent; an
/// empty set is a legitimate answer.
pub trait InstancePortInventory {
    fn list_all(&self) -> impl Future<Output = Result<BTreeSet<String>, CoreError>> + Send;
}

impl<T: TunnelCreationService> TunnelCreationService for &T {
    fn create(
        &self,
        descriptor: &TunnelDescriptor,
    ) -> impl Future<Output = Result<TunnelId, CoreError>> + Send {
        (**self).create(descriptor)
    }
}

impl<T: InstancePortInventory> InstancePortInventory for &T {
    fn list_all(&self) -> impl Future<Output = Result<BTreeSet<String>, CoreError>> + Send {
        (**self).list_all()
    }
}

// ── Provisioner ─────────────────────────────────────────────────────

/// Builds a descriptor and submits it, at most once, to the creation service.
pub struct Provisioner<S> {
    registry: TunnelTypeRegistry,
    service: S,
}

impl<S: TunnelCreationService> Provisioner<S> {
    pub fn new(registry: TunnelTypeRegistry, service: S) -> Self {
        Self { registry, service }
    }

    pub fn registry(&self) -> &TunnelTypeRegistry {
        &self.registry
    }

    /// Validate without submitting.
    pub fn prepare(&self, request: &TunnelRequest) -> Result<TunnelDescriptor, CoreError> {
        TunnelDescriptorBuilder::new(&self.registry).build(request)
    }

    /// Validate, then submit exactly once. Validation failures never reach
    /// the service; service failures are returned as-is without retry.
    pub async fn provision(&self, request: &TunnelRequest) -> Result<TunnelId, CoreError> {
        let descriptor = self.prepare(request)?;
        debug!(?descriptor, "tunnel descriptor built");
        self.submit(&descriptor).await
    }

    /// Submit an already-built descriptor exactly once.
    pub async fn submit(&self, descriptor: &TunnelDescriptor) -> Result<TunnelId, CoreError> {
        let id = self.service.create(descriptor).await?;
        info!(
            tunnel_id = %id,
            tunnel_type = %descriptor.tunnel_type(),
            group_id = %descriptor.group_id(),
            "tunnel created"
        );
        Ok(id)
    }
}

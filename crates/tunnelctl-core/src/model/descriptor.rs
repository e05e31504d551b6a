// ── Tunnel descriptor ──
//
// The immutable creation request handed to the tunnel backend. Only
// `TunnelDescriptorBuilder` can produce one, so every descriptor observed
// outside the builder is complete and family-consistent.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::endpoint::{Endpoint, ProducerId};
use super::tunnel_type::TunnelType;

// ── Small identifiers ───────────────────────────────────────────────

/// Pre-existing flow-group association a tunnel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u32);

impl GroupId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelName(String);

impl TunnelName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TunnelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier allocated by the backend for a created tunnel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TunnelId(String);

impl TunnelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TunnelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Annotations ─────────────────────────────────────────────────────

/// Ordered string-keyed metadata attached to a tunnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(IndexMap<String, String>);

impl Annotations {
    pub const BANDWIDTH: &'static str = "bandwidth";

    pub(crate) fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn bandwidth(&self) -> Option<&str> {
        self.get(Self::BANDWIDTH)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ── TunnelDescriptor ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelDescriptor {
    /// Always `None`: the backend allocates the identifier.
    id: Option<TunnelId>,
    src: Endpoint,
    dst: Endpoint,
    #[serde(rename = "type")]
    tunnel_type: TunnelType,
    group_id: GroupId,
    producer: ProducerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<TunnelName>,
    annotations: Annotations,
}

impl TunnelDescriptor {
    pub(crate) fn new(
        src: Endpoint,
        dst: Endpoint,
        tunnel_type: TunnelType,
        group_id: GroupId,
        producer: ProducerId,
        name: Option<TunnelName>,
        annotations: Annotations,
    ) -> Self {
        debug_assert_eq!(src.family(), tunnel_type.family());
        debug_assert_eq!(dst.family(), tunnel_type.family());
        Self {
            id: None,
            src,
            dst,
            tunnel_type,
            group_id,
            producer,
            name,
            annotations,
        }
    }

    pub fn id(&self) -> Option<&TunnelId> {
        self.id.as_ref()
    }

    pub fn src(&self) -> &Endpoint {
        &self.src
    }

    pub fn dst(&self) -> &Endpoint {
        &self.dst
    }

    pub fn tunnel_type(&self) -> TunnelType {
        self.tunnel_type
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn producer(&self) -> &ProducerId {
        &self.producer
    }

    pub fn name(&self) -> Option<&TunnelName> {
        self.name.as_ref()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }
}

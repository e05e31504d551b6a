// ── Raw provisioning requests ──
//
// Operator input exactly as typed. Nothing here is validated; the
// descriptor builder turns a `TunnelRequest` into a `TunnelDescriptor`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelRequest {
    pub src: String,
    pub dst: String,
    pub tunnel_type: String,
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<String>,
}

impl TunnelRequest {
    pub fn new(
        src: impl Into<String>,
        dst: impl Into<String>,
        tunnel_type: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            tunnel_type: tunnel_type.into(),
            group_id: group_id.into(),
            name: None,
            bandwidth: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: impl Into<String>) -> Self {
        self.bandwidth = Some(bandwidth.into());
        self
    }
}

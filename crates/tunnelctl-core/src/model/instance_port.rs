// ── Instance ports ──
//
// Network-attachment records exposed by the instance-port inventory.
// Completion only ever looks at `port_id`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancePort {
    pub port_id: String,
    pub device_id: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub network_id: Option<String>,
    pub state: Option<String>,
}

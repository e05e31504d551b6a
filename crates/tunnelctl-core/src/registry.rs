// ── Tunnel type registry ──
//
// Maps an operator-supplied type tag to its `TunnelType`, endpoint family
// and the producer identity used for this tool instance.

use crate::error::CoreError;
use crate::model::{EndpointFamily, ProducerId, TunnelType};

/// Result of resolving a type tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub tunnel_type: TunnelType,
    pub family: EndpointFamily,
    pub producer: ProducerId,
}

#[derive(Debug, Clone, Default)]
pub struct TunnelTypeRegistry {
    producer: ProducerId,
}

impl TunnelTypeRegistry {
    pub fn new(producer: ProducerId) -> Self {
        Self { producer }
    }

    /// The owning identity stamped on every descriptor built with this registry.
    pub fn producer(&self) -> &ProducerId {
        &self.producer
    }

    /// Resolve a tag, matched case-sensitively against the six supported types.
    pub fn resolve(&self, tag: &str) -> Result<Resolution, CoreError> {
        let tunnel_type: TunnelType = tag.parse().map_err(|_| CoreError::UnknownTunnelType {
            tag: tag.into(),
            valid: TunnelType::valid_tags(),
        })?;

        Ok(Resolution {
            tunnel_type,
            family: tunnel_type.family(),
            producer: self.producer.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_tag_to_its_family() {
        let registry = TunnelTypeRegistry::default();
        let cases = [
            ("MPLS", TunnelType::Mpls, EndpointFamily::Ip),
            ("VLAN", TunnelType::Vlan, EndpointFamily::Ip),
            ("VXLAN", TunnelType::Vxlan, EndpointFamily::Ip),
            ("GRE", TunnelType::Gre, EndpointFamily::Ip),
            ("ODUK", TunnelType::Oduk, EndpointFamily::Optical),
            ("OCH", TunnelType::Och, EndpointFamily::Optical),
        ];
        for (tag, ty, family) in cases {
            let res = registry.resolve(tag).unwrap();
            assert_eq!(res.tunnel_type, ty, "tag {tag}");
            assert_eq!(res.family, family, "tag {tag}");
            assert_eq!(res.producer, ProducerId::default());
        }
    }

    #[test]
    fn unknown_tag_lists_valid_tags() {
        let registry = TunnelTypeRegistry::default();
        for tag in ["ATM", "vxlan", "", " GRE", "GRE "] {
            match registry.resolve(tag) {
                Err(CoreError::UnknownTunnelType { tag: got, valid }) => {
                    assert_eq!(got, tag);
                    assert_eq!(valid, "MPLS, VLAN, VXLAN, GRE, ODUK, OCH");
                }
                other => panic!("expected UnknownTunnelType for {tag:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn custom_producer_is_carried() {
        let producer = ProducerId::new("lab", "tunnels.lab");
        let registry = TunnelTypeRegistry::new(producer.clone());
        assert_eq!(registry.resolve("OCH").unwrap().producer, producer);
    }
}

// ── Tunnel descriptor builder ──
//
// resolve type → parse src → parse dst → parse group id → annotations.
// The first failure aborts; nothing is submitted from here.

use crate::codec;
use crate::error::CoreError;
use crate::model::{Annotations, GroupId, TunnelDescriptor, TunnelName};
use crate::registry::TunnelTypeRegistry;
use crate::requests::TunnelRequest;

/// Bandwidth recorded when the operator gives none.
pub const DEFAULT_BANDWIDTH: &str = "0";

pub struct TunnelDescriptorBuilder<'a> {
    registry: &'a TunnelTypeRegistry,
}

impl<'a> TunnelDescriptorBuilder<'a> {
    pub fn new(registry: &'a TunnelTypeRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self, request: &TunnelRequest) -> Result<TunnelDescriptor, CoreError> {
        let resolved = self.registry.resolve(&request.tunnel_type)?;

        let src = codec::parse(&request.src, resolved.family, &resolved.producer)
            .map_err(|e| CoreError::endpoint("src", e))?;
        let dst = codec::parse(&request.dst, resolved.family, &resolved.producer)
            .map_err(|e| CoreError::endpoint("dst", e))?;

        let group_id = parse_group_id(&request.group_id)?;

        let annotations = Annotations::default().with(
            Annotations::BANDWIDTH,
            bandwidth_or_default(request.bandwidth.as_deref()),
        );

        let name = request
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(TunnelName::new);

        Ok(TunnelDescriptor::new(
            src,
            dst,
            resolved.tunnel_type,
            group_id,
            resolved.producer,
            name,
            annotations,
        ))
    }
}

fn parse_group_id(raw: &str) -> Result<GroupId, CoreError> {
    raw.parse::<u32>()
        .map(GroupId::new)
        .map_err(|_| CoreError::InvalidGroupId { raw: raw.into() })
}

/// Absent and empty both mean "not given". Any other value is kept verbatim.
fn bandwidth_or_default(raw: Option<&str>) -> &str {
    match raw {
        None | Some("") => DEFAULT_BANDWIDTH,
        Some(value) => value,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::net::IpAddr;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Endpoint, OpticalLogicId, ProducerId, TunnelType};

    fn build(request: &TunnelRequest) -> Result<TunnelDescriptor, CoreError> {
        let registry = TunnelTypeRegistry::default();
        TunnelDescriptorBuilder::new(&registry).build(request)
    }

    #[test]
    fn vxlan_between_two_addresses() {
        let d = build(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "VXLAN", "3")).unwrap();

        let src: IpAddr = "10.0.0.1".parse().unwrap();
        let dst: IpAddr = "10.0.0.2".parse().unwrap();
        assert_eq!(d.src().as_ip().unwrap().addr(), src);
        assert_eq!(d.dst().as_ip().unwrap().addr(), dst);
        assert_eq!(d.tunnel_type(), TunnelType::Vxlan);
        assert_eq!(d.group_id().get(), 3);
        assert_eq!(d.annotations().bandwidth(), Some("0"));
        assert_eq!(d.annotations().len(), 1);
        assert!(d.id().is_none());
        assert!(d.name().is_none());
        assert_eq!(d.producer(), &ProducerId::default());
    }

    #[test]
    fn och_between_two_optical_ports() {
        let d = build(&TunnelRequest::new("dev1-1", "dev2-2", "OCH", "9")).unwrap();

        for (ep, device, port) in [(d.src(), "dev1", 1), (d.dst(), "dev2", 2)] {
            let Endpoint::Optical(o) = ep else {
                panic!("expected optical endpoint, got {ep:?}");
            };
            assert_eq!(o.device.as_str(), device);
            assert_eq!(o.port.get(), port);
            assert_eq!(o.logic_id, OpticalLogicId::DEFAULT);
            assert!(o.global);
        }
        assert_eq!(d.tunnel_type(), TunnelType::Och);
        assert_eq!(d.group_id().get(), 9);
    }

    #[test]
    fn oduk_uses_the_same_separator_as_och() {
        let d = build(&TunnelRequest::new("a-10", "b-20", "ODUK", "0")).unwrap();
        assert_eq!(d.src().as_optical().unwrap().port.get(), 10);
        assert_eq!(d.dst().as_optical().unwrap().device.as_str(), "b");
    }

    #[test]
    fn bandwidth_is_kept_verbatim() {
        let d = build(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "GRE", "1").with_bandwidth("500"))
            .unwrap();
        assert_eq!(d.annotations().bandwidth(), Some("500"));

        let d = build(
            &TunnelRequest::new("10.0.0.1", "10.0.0.2", "GRE", "1").with_bandwidth("10 Gbps"),
        )
        .unwrap();
        assert_eq!(d.annotations().bandwidth(), Some("10 Gbps"));
    }

    #[test]
    fn empty_bandwidth_defaults_to_zero() {
        let d = build(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "MPLS", "1").with_bandwidth(""))
            .unwrap();
        assert_eq!(d.annotations().bandwidth(), Some("0"));
    }

    #[test]
    fn name_is_optional() {
        let d = build(&TunnelRequest::new("::1", "::2", "VLAN", "4").with_name("core-east")).unwrap();
        assert_eq!(d.name().unwrap().as_str(), "core-east");

        let d = build(&TunnelRequest::new("::1", "::2", "VLAN", "4").with_name("")).unwrap();
        assert!(d.name().is_none());
    }

    #[test]
    fn unknown_type_is_checked_first() {
        let err = build(&TunnelRequest::new("garbage", "garbage", "ATM", "x")).unwrap_err();
        assert!(matches!(err, CoreError::UnknownTunnelType { ref tag, .. } if tag == "ATM"));
    }

    #[test]
    fn src_is_checked_before_dst() {
        let err = build(&TunnelRequest::new("bad-src", "bad-dst", "MPLS", "1")).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidAddress { ref field, ref raw } if field == "src" && raw == "bad-src")
        );

        let err = build(&TunnelRequest::new("10.0.0.1", "bad-dst", "MPLS", "1")).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidAddress { ref field, ref raw } if field == "dst" && raw == "bad-dst")
        );
    }

    #[test]
    fn endpoint_family_must_match_type() {
        let err = build(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "OCH", "1")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOpticalEndpoint { ref field, .. } if field == "src"));

        let err = build(&TunnelRequest::new("dev1-1", "dev2-2", "VXLAN", "1")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidAddress { ref field, .. } if field == "src"));
    }

    #[test]
    fn malformed_optical_arity_is_rejected() {
        let err = build(&TunnelRequest::new("dev1-1", "dev2", "ODUK", "1")).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidOpticalEndpoint { ref field, ref raw, .. } if field == "dst" && raw == "dev2")
        );
    }

    #[test]
    fn group_id_must_be_non_negative_integer() {
        for raw in ["", "-1", "abc", "1.5", "4294967296"] {
            let err = build(&TunnelRequest::new("10.0.0.1", "10.0.0.2", "GRE", raw)).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidGroupId { raw: ref got } if got == raw),
                "group id {raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn descriptor_serializes_with_family_tags() {
        let d = build(&TunnelRequest::new("dev1-1", "dev2-2", "OCH", "9")).unwrap();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "OCH");
        assert_eq!(json["src"]["family"], "optical");
        assert_eq!(json["src"]["kind"], "lambda");
        assert_eq!(json["src"]["device"], "dev1");
        assert_eq!(json["dst"]["port"], 2);
        assert_eq!(json["annotations"]["bandwidth"], "0");
        assert!(json["id"].is_null());
    }
}

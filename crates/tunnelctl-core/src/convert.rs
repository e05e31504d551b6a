// ── Domain ↔ wire conversion ──
//
// The only place that knows both `crate::model` and `tunnelctl_api::types`.

use tunnelctl_api::types::{
    CreateTunnelBody, EndpointBody, InstancePortResponse, ProducerBody,
};

use crate::model::{Endpoint, InstancePort, ProducerId, TunnelDescriptor};

impl From<&Endpoint> for EndpointBody {
    fn from(ep: &Endpoint) -> Self {
        match ep {
            Endpoint::Ip(ip) => EndpointBody::Ip {
                address: ip.addr().to_string(),
            },
            Endpoint::Optical(o) => EndpointBody::Optical {
                device_id: o.device.to_string(),
                port: o.port.get(),
                channel: o.kind.as_str().into(),
                logic_id: o.logic_id.get(),
                global: o.global,
            },
        }
    }
}

impl From<&ProducerId> for ProducerBody {
    fn from(p: &ProducerId) -> Self {
        ProducerBody {
            scheme: p.scheme.clone(),
            id: p.id.clone(),
        }
    }
}

impl From<&TunnelDescriptor> for CreateTunnelBody {
    fn from(d: &TunnelDescriptor) -> Self {
        CreateTunnelBody {
            src: d.src().into(),
            dst: d.dst().into(),
            tunnel_type: d.tunnel_type().to_string(),
            group_id: d.group_id().get(),
            producer: d.producer().into(),
            name: d.name().map(ToString::to_string),
            annotations: d
                .annotations()
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }
}

impl From<InstancePortResponse> for InstancePort {
    fn from(r: InstancePortResponse) -> Self {
        InstancePort {
            port_id: r.port_id,
            device_id: r.device_id,
            ip_address: r.ip_address,
            mac_address: r.mac_address,
            network_id: r.network_id,
            state: r.state,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::builder::TunnelDescriptorBuilder;
    use crate::registry::TunnelTypeRegistry;
    use crate::requests::TunnelRequest;

    #[test]
    fn optical_descriptor_to_wire_body() {
        let registry = TunnelTypeRegistry::default();
        let d = TunnelDescriptorBuilder::new(&registry)
            .build(
                &TunnelRequest::new("dev1-1", "dev2-2", "ODUK", "9")
                    .with_name("metro")
                    .with_bandwidth("100"),
            )
            .unwrap();

        let body = CreateTunnelBody::from(&d);
        assert_eq!(body.tunnel_type, "ODUK");
        assert_eq!(body.group_id, 9);
        assert_eq!(body.name.as_deref(), Some("metro"));
        assert_eq!(
            body.src,
            EndpointBody::Optical {
                device_id: "dev1".into(),
                port: 1,
                channel: "lambda".into(),
                logic_id: 0,
                global: true,
            }
        );
        assert_eq!(body.annotations.get("bandwidth").map(String::as_str), Some("100"));
        assert_eq!(body.producer.scheme, ProducerId::DEFAULT_SCHEME);
    }

    #[test]
    fn ip_descriptor_to_wire_body() {
        let registry = TunnelTypeRegistry::default();
        let d = TunnelDescriptorBuilder::new(&registry)
            .build(&TunnelRequest::new("fd00::1", "fd00::2", "GRE", "7"))
            .unwrap();

        let body = CreateTunnelBody::from(&d);
        assert_eq!(
            body.dst,
            EndpointBody::Ip {
                address: "fd00::2".into()
            }
        );
        assert!(body.name.is_none());
    }
}

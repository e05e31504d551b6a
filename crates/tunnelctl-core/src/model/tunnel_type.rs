// ── Tunnel technology types ──
//
// The closed set of transport technologies a tunnel can be provisioned on,
// and the endpoint family each one is addressed with.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// How the endpoints of a tunnel are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointFamily {
    /// A single network address per endpoint.
    Ip,
    /// A device/port pair on optical hardware.
    Optical,
}

/// Tunnel technology. Tags are the upper-case variant names and are
/// matched case-sensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TunnelType {
    Mpls,
    Vlan,
    Vxlan,
    Gre,
    Oduk,
    Och,
}

impl TunnelType {
    /// Every supported type, in the order they are presented to operators.
    pub const ALL: [Self; 6] = [
        Self::Mpls,
        Self::Vlan,
        Self::Vxlan,
        Self::Gre,
        Self::Oduk,
        Self::Och,
    ];

    pub fn family(self) -> EndpointFamily {
        match self {
            Self::Mpls | Self::Vlan | Self::Vxlan | Self::Gre => EndpointFamily::Ip,
            Self::Oduk | Self::Och => EndpointFamily::Optical,
        }
    }

    /// Comma-separated list of every valid tag.
    pub fn valid_tags() -> String {
        Self::ALL
            .iter()
            .map(AsRef::<str>::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for ty in TunnelType::ALL {
            let parsed: TunnelType = ty.to_string().parse().unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert!("vxlan".parse::<TunnelType>().is_err());
        assert!("Och".parse::<TunnelType>().is_err());
        assert_eq!("OCH".parse::<TunnelType>().unwrap(), TunnelType::Och);
    }

    #[test]
    fn valid_tags_lists_all_six_in_order() {
        assert_eq!(TunnelType::valid_tags(), "MPLS, VLAN, VXLAN, GRE, ODUK, OCH");
    }

    #[test]
    fn serde_uses_upper_case_tag() {
        let json = serde_json::to_string(&TunnelType::Oduk).unwrap();
        assert_eq!(json, "\"ODUK\"");
    }
}

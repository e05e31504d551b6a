// ── Endpoint codec ──
//
// Turns one raw endpoint string into a typed `Endpoint` for a given
// endpoint family. Pure: no I/O, no logging, no backend access.
//
//   Ip       "10.0.0.1", "fd00::1"
//   Optical  "<device>-<port>", e.g. "of:0000000000000001-7"

use std::net::IpAddr;

use thiserror::Error;

use crate::model::{
    DeviceId, Endpoint, EndpointFamily, IpEndpoint, OpticalEndpoint, PortNumber, ProducerId,
};

/// Separator between device identifier and port number in optical endpoints.
pub const OPTICAL_SEPARATOR: char = '-';

/// Why an optical endpoint string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpticalDefect {
    #[error("expected <device>-<port>, found no '-' separator")]
    MissingSeparator,
    #[error("expected exactly one '-' separator")]
    TooManySeparators,
    #[error("device identifier is empty")]
    EmptyDevice,
    #[error("port number is empty")]
    EmptyPort,
    #[error("port number is not a non-negative integer")]
    InvalidPort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("'{raw}' is not a valid IP address")]
    InvalidAddress { raw: String },

    #[error("'{raw}' is not a valid optical endpoint: {reason}")]
    InvalidOpticalEndpoint { raw: String, reason: OpticalDefect },
}

/// Parse `raw` as an endpoint of the given family.
///
/// `producer` becomes the owner of optical endpoints; IP endpoints carry
/// nothing but the address.
pub fn parse(
    raw: &str,
    family: EndpointFamily,
    producer: &ProducerId,
) -> Result<Endpoint, EndpointError> {
    match family {
        EndpointFamily::Ip => parse_ip(raw).map(Endpoint::Ip),
        EndpointFamily::Optical => parse_optical(raw, producer).map(Endpoint::Optical),
    }
}

fn parse_ip(raw: &str) -> Result<IpEndpoint, EndpointError> {
    raw.parse::<IpAddr>()
        .map(IpEndpoint::new)
        .map_err(|_| EndpointError::InvalidAddress { raw: raw.into() })
}

fn parse_optical(raw: &str, producer: &ProducerId) -> Result<OpticalEndpoint, EndpointError> {
    let invalid = |reason| EndpointError::InvalidOpticalEndpoint {
        raw: raw.into(),
        reason,
    };

    let (device, port) = split_device_port(raw).map_err(invalid)?;
    // Decimal digits only; `u64::from_str` would also take a leading `+`.
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(OpticalDefect::InvalidPort));
    }
    let port: u64 = port.parse().map_err(|_| invalid(OpticalDefect::InvalidPort))?;

    Ok(OpticalEndpoint::lambda(
        producer.clone(),
        DeviceId::new(device),
        PortNumber::new(port),
    ))
}

/// Split into exactly two non-empty parts around a single separator.
fn split_device_port(raw: &str) -> Result<(&str, &str), OpticalDefect> {
    let Some((device, port)) = raw.split_once(OPTICAL_SEPARATOR) else {
        return Err(OpticalDefect::MissingSeparator);
    };
    if port.contains(OPTICAL_SEPARATOR) {
        return Err(OpticalDefect::TooManySeparators);
    }
    if device.is_empty() {
        return Err(OpticalDefect::EmptyDevice);
    }
    if port.is_empty() {
        return Err(OpticalDefect::EmptyPort);
    }
    Ok((device, port))
}

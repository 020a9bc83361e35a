//! Parser for the `discover` response.
//!
//! ```text
//! hdhomerun device 103440A8 found at 192.168.1.217
//! hdhomerun device 1041B2C4 found at 192.168.1.218
//! ```

use std::collections::BTreeSet;

use crate::error::ProtocolError;
use crate::tokenize::tokenize;
use crate::types::{Device, DeviceMap, NO_DEVICES_RESPONSE};

/// Parse a single discovery line into `(device id, ip)`.
///
/// Anything other than the exact six-word shape is rejected.
pub fn parse_discovery_line(line: &str) -> Result<(&str, &str), ProtocolError> {
    match tokenize(" ", line).as_slice() {
        ["hdhomerun", "device", id, "found", "at", ip] => Ok((*id, *ip)),
        _ => Err(ProtocolError::MalformedDiscoveryLine(line.to_string())),
    }
}

/// Parse a `discover` response.
///
/// `tuners` is asked for the tuner set of every device id found. A response
/// that is exactly the "no devices found" sentinel fails with
/// [`ProtocolError::NoDevicesFound`] instead of returning an empty map.
pub fn parse_discovery<E, F>(response: &str, mut tuners: F) -> Result<DeviceMap, E>
where
    E: From<ProtocolError>,
    F: FnMut(&str) -> Result<BTreeSet<u32>, E>,
{
    if response.trim() == NO_DEVICES_RESPONSE {
        return Err(ProtocolError::NoDevicesFound.into());
    }

    let mut devices = DeviceMap::new();
    for line in tokenize("\n", response) {
        let (id, ip) = parse_discovery_line(line)?;
        let device = Device {
            ip: ip.to_string(),
            tuners: tuners(id)?,
        };
        devices.insert(id.to_string(), device);
    }

    Ok(devices)
}

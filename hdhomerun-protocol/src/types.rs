//! Data types and literals of the hdhomerun_config text protocol.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Library version reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whole response of `discover` when nothing answered.
pub const NO_DEVICES_RESPONSE: &str = "no devices found";

/// Feature key listing the channel maps a device supports.
pub const FEATURES_CHANNELMAP_KEY: &str = "channelmap";

/// First token of the result line following each scan line.
pub const LOCK_PREFIX: &str = "LOCK:";

/// Lock value reported when no signal was acquired.
pub const LOCK_NONE: &str = "none";

/// First token of each program line in a scan report.
pub const PROGRAM_PREFIX: &str = "PROGRAM";

/// First token of the optional transport stream id line in a scan report.
pub const TSID_PREFIX: &str = "TSID:";

/// Tuner indices assumed when the device is not asked.
pub const DEFAULT_TUNERS: [u32; 2] = [0, 1];

/// Device identifier as assigned by the vendor (hex string, e.g. `103440A8`).
pub type DeviceId = String;

/// A device found by `discover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Network address the device answered from.
    pub ip: String,
    /// Tuner indices available on the device.
    pub tuners: BTreeSet<u32>,
}

/// Discovery result keyed by device id, in the order devices were reported.
pub type DeviceMap = IndexMap<DeviceId, Device>;

/// Feature name to the ordered list of supported values.
pub type FeatureMap = IndexMap<String, Vec<String>>;

/// Raw `key=value` pairs from a tuner status line.
pub type TunerStatus = IndexMap<String, String>;

/// Program (virtual sub-channel) carried by a scanned channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    /// Friendly number as printed by the appliance (e.g. `3.1`).
    pub friendly_number: String,
    /// Friendly name (e.g. `WBTV-HD`). Empty if the appliance printed none.
    pub friendly_name: String,
}

/// A channel that achieved a lock during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedChannel {
    /// Internal channel identifier (token 1 of the scan line).
    pub internal_channel: String,
    /// Lock modulation reported on the result line (e.g. `8vsb`).
    pub lock: String,
    /// Transport stream id, if the appliance printed a `TSID:` line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsid: Option<String>,
    /// Programs keyed by program number.
    pub programs: IndexMap<u32, ProgramInfo>,
}

/// Scan result keyed by friendly channel number, in scan order.
pub type ScanResult = IndexMap<u32, ScannedChannel>;

/// Streaming protocol used for a tuner target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamProtocol {
    /// RTP over UDP.
    #[default]
    Rtp,
    /// Raw UDP.
    Udp,
}

impl StreamProtocol {
    /// URL scheme used in the target parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            StreamProtocol::Rtp => "rtp",
            StreamProtocol::Udp => "udp",
        }
    }
}

impl fmt::Display for StreamProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rtp" => Ok(StreamProtocol::Rtp),
            "udp" => Ok(StreamProtocol::Udp),
            other => Err(format!("unknown stream protocol: {}", other)),
        }
    }
}

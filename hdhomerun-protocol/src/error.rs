//! Error types for the hdhomerun_config text protocol.

use thiserror::Error;

/// Errors raised while interpreting a textual response.
///
/// Every grammar violation carries the raw line (or token) that failed, so
/// the caller can report exactly what the appliance sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Discovery explicitly reported that no device answered.
    #[error("No devices found")]
    NoDevicesFound,

    /// Discovery line did not have the `hdhomerun device <ID> found at <IP>` shape.
    #[error("DISCOVER: unexpected line {0:?}. Expected \"hdhomerun device <ID> found at <IP>\"")]
    MalformedDiscoveryLine(String),

    /// Feature line without a `:` separator.
    #[error("FEATURES: unexpected line {0:?}. Expected \"<key>:<values>\"")]
    MalformedFeatureLine(String),

    /// Scan line without an internal channel or a `map:number` pair.
    #[error("SCAN: unexpected scan line {0:?}")]
    MalformedScanLine(String),

    /// Line following a scan line did not start with `LOCK:`.
    #[error("SCAN: unexpected result line {0:?}. Expected prefix of \"LOCK:\"")]
    UnexpectedResultLine(String),

    /// Scan report ended right after a scan line.
    #[error("SCAN: scan line {0:?} has no result line")]
    MissingResultLine(String),

    /// `PROGRAM` line missing its number or friendly number.
    #[error("SCAN: unexpected program line {0:?}")]
    MalformedProgramLine(String),

    /// Status token without a `=` separator, or with an empty key.
    #[error("STATUS: unexpected token {0:?}. Expected \"<key>=<value>\"")]
    MalformedStatusToken(String),
}

impl ProtocolError {
    /// Returns true if this error describes a response that broke its grammar.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, ProtocolError::NoDevicesFound)
    }

    /// The raw line or token that could not be interpreted.
    pub fn fragment(&self) -> Option<&str> {
        match self {
            ProtocolError::NoDevicesFound => None,
            ProtocolError::MalformedDiscoveryLine(s)
            | ProtocolError::MalformedFeatureLine(s)
            | ProtocolError::MalformedScanLine(s)
            | ProtocolError::UnexpectedResultLine(s)
            | ProtocolError::MissingResultLine(s)
            | ProtocolError::MalformedProgramLine(s)
            | ProtocolError::MalformedStatusToken(s) => Some(s),
        }
    }
}

//! Text protocol definitions for the `hdhomerun_config` tool.
//!
//! This crate builds the command lines sent to `hdhomerun_config` and parses
//! the free-form text it prints back. It performs no I/O.
//!
//! # Responses
//!
//! | Command                | Shape                                   | Parser              |
//! |------------------------|-----------------------------------------|---------------------|
//! | `discover`             | `hdhomerun device <ID> found at <IP>`   | [`parse_discovery`] |
//! | `get /sys/features`    | `<key>: <value> <value> ...`            | [`parse_features`]  |
//! | `scan /tunerN`         | `SCAN:` / `LOCK:` / `PROGRAM` records   | [`parse_scan`]      |
//! | `get /tunerN/status`   | `<key>=<value> <key>=<value> ...`       | [`parse_status`]    |
//!
//! # Example
//!
//! ```rust
//! use hdhomerun_protocol::{parse_status, CommandLine, TunerCommand};
//!
//! let line = CommandLine::tuner(TunerCommand::Status, 0, "103440A8");
//! assert_eq!(line.to_string(), "103440A8 get /tuner0/status");
//!
//! let status = parse_status("ss=100 snq=95 seq=100").unwrap();
//! assert_eq!(status["snq"], "95");
//! ```

pub mod command;
pub mod discovery;
pub mod error;
pub mod features;
pub mod scan;
pub mod status;
pub mod tokenize;
pub mod types;

pub use command::{
    build, CommandLine, TunerCommand, DISCOVER_COMMAND, SYS_FEATURES_COMMAND, TUNER_PLACEHOLDER,
};
pub use discovery::{parse_discovery, parse_discovery_line};
pub use error::ProtocolError;
pub use features::parse_features;
pub use scan::{parse_scan, parse_scan_with, LineCursor};
pub use status::parse_status;
pub use tokenize::tokenize;
pub use types::{
    Device, DeviceId, DeviceMap, FeatureMap, ProgramInfo, ScanResult, ScannedChannel,
    StreamProtocol, TunerStatus, DEFAULT_TUNERS, FEATURES_CHANNELMAP_KEY, LOCK_NONE, LOCK_PREFIX,
    NO_DEVICES_RESPONSE, PROGRAM_PREFIX, TSID_PREFIX, VERSION,
};

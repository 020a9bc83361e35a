//! hdhomerun-client library - control HDHomeRun tuners through `hdhomerun_config`
//!
//! The [`Client`] issues commands through a [`CommandExecutor`], parses the
//! text responses with `hdhomerun-protocol` and keeps a validated
//! [`Session`] (current device, tuner, channel map, channel and program).
//!
//! ```rust,no_run
//! use hdhomerun_client::{Client, LogCrateSink, ProcessExecutor};
//!
//! let mut client = Client::new(ProcessExecutor::default()).with_logger(LogCrateSink);
//! let devices = client.discover()?;
//! if let Some(id) = devices.keys().next() {
//!     client.set_current_device_id(id.clone());
//!     client.set_current_tuner_id(0)?;
//!     client.set_current_channel_map("us-bcast")?;
//!     for (number, channel) in client.scan()? {
//!         println!("{} -> {} programs", number, channel.programs.len());
//!     }
//! }
//! # Ok::<(), hdhomerun_client::ClientError>(())
//! ```

pub mod client;
pub mod error;
pub mod executor;
pub mod log_sink;
pub mod session;
pub mod tuners;

// Re-export commonly used types
pub use client::{target_url, Client};
pub use error::{ClientError, ClientResult, ConfigurationError, ExecError};
pub use executor::{CommandExecutor, ProcessExecutor, DEFAULT_CONFIG_COMMAND};
pub use log_sink::{LogCrateSink, LogSink, NullLog, Severity};
pub use session::Session;
pub use tuners::{FixedTuners, TunerSource};

pub use hdhomerun_protocol as protocol;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hdhomerun_protocol::StreamProtocol;

#[derive(Debug, Parser)]
#[clap(name = "hdhrctl")]
#[clap(about = "hdhrctl drives HDHomeRun tuners through hdhomerun_config. ", long_about = None)]
#[clap(version)]
pub(crate) struct Cli {
    /// Path to the hdhomerun_config tool.{n}
    /// Defaults to the config file, then $HDHOMERUN_CONFIG_COMMAND,
    /// then `hdhomerun_config` on the PATH.
    #[clap(long, value_name = "PATH", global = true)]
    pub command: Option<PathBuf>,

    /// The device ID (e.g. `103440A8`).{n}
    /// If omitted, the first discovered device is used.
    #[clap(short, long, global = true)]
    pub device: Option<String>,

    /// The tuner index on the device.
    #[clap(short, long, global = true)]
    pub tuner: Option<u32>,

    /// Configuration file path.{n}
    /// `hdhomerun.toml` in the working directory is used if present.
    #[clap(short = 'f', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging.
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Output format.
    #[clap(value_enum, long, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[clap(subcommand)]
    pub command_kind: Commands,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Streaming protocol for `target set`.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum ProtocolArg {
    #[default]
    Rtp,
    Udp,
}

impl From<ProtocolArg> for StreamProtocol {
    fn from(value: ProtocolArg) -> Self {
        match value {
            ProtocolArg::Rtp => StreamProtocol::Rtp,
            ProtocolArg::Udp => StreamProtocol::Udp,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Discover devices on the local network.
    Discover,

    /// List the features of a device.{n}
    /// Channel maps accepted by `channelmap` and `scan` are listed here.
    Features,

    /// Scan all channels on a tuner.{n}
    /// Only channels that achieved a lock are printed.
    Scan {
        /// Set this channel map before scanning.
        #[clap(short = 'm', long)]
        channel_map: Option<String>,
    },

    /// Print the tuner status (signal strength, quality, ...).
    Status,

    /// Tune to a channel.
    Tune {
        /// The channel, e.g. `auto:183000000` or `8vsb:57000000`.
        #[clap(short, long, required = true)]
        channel: String,

        /// Select this program after tuning.
        #[clap(short, long)]
        program: Option<u32>,
    },

    /// Set the channel map of a tuner.
    #[clap(name = "channelmap")]
    ChannelMap {
        /// Channel map name, e.g. `us-bcast`.
        #[clap(required = true)]
        channel_map: String,
    },

    /// Read or set the streaming target of a tuner.
    Target {
        #[clap(subcommand)]
        action: TargetAction,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum TargetAction {
    /// Print the current target.
    Get,

    /// Stream the tuner to `<protocol>://<ip>:<port>`.
    Set {
        /// Receiver address.
        ip: IpAddr,

        /// Receiver port.
        port: u16,

        /// Streaming protocol.
        #[clap(value_enum, long, default_value = "rtp")]
        protocol: ProtocolArg,
    },
}

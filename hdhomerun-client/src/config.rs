//! Configuration loading for hdhrctl.
//!
//! Settings are resolved in this order:
//! 1. Command line flags
//! 2. TOML configuration file (`--config`, or `hdhomerun.toml` in the working directory)
//! 3. Environment variables (HDHOMERUN_*)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::Deserialize;

use hdhomerun_client::DEFAULT_CONFIG_COMMAND;
use hdhomerun_protocol::DEFAULT_TUNERS;

/// Config file looked up in the working directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "hdhomerun.toml";

/// Configuration file format.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub hdhomerun: HdHomeRunSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct HdHomeRunSection {
    pub command: Option<String>,
    pub device: Option<String>,
    pub tuner: Option<u32>,
    pub tuners: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct LoggingSection {
    pub level: Option<String>,
    pub log_dir: Option<String>,
    pub retention_days: Option<u64>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settings {
    pub command: PathBuf,
    pub device: Option<String>,
    pub tuner: Option<u32>,
    pub tuners: Vec<u32>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub log_retention_days: u64,
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub command: Option<PathBuf>,
    pub device: Option<String>,
    pub tuner: Option<u32>,
}

pub(crate) fn load_config(path: &Path) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: ConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Config file to use: explicit path > auto-detect > none.
pub(crate) fn find_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        default_path.exists().then_some(default_path)
    })
}

/// Merge command line, file and environment into [`Settings`].
pub(crate) fn resolve(
    overrides: Overrides,
    file: ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let command = overrides
        .command
        .or_else(|| file.hdhomerun.command.map(PathBuf::from))
        .or_else(|| env("HDHOMERUN_CONFIG_COMMAND").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_COMMAND));

    let device = overrides
        .device
        .or(file.hdhomerun.device)
        .or_else(|| env("HDHOMERUN_DEVICE"));

    let tuner = overrides
        .tuner
        .or(file.hdhomerun.tuner)
        .or_else(|| env("HDHOMERUN_TUNER").and_then(|s| s.parse().ok()));

    let tuners = file
        .hdhomerun
        .tuners
        .filter(|tuners| !tuners.is_empty())
        .unwrap_or_else(|| DEFAULT_TUNERS.to_vec());

    Settings {
        command,
        device,
        tuner,
        tuners,
        log_level: file.logging.level,
        log_dir: file.logging.log_dir.map(PathBuf::from),
        log_retention_days: file.logging.retention_days.unwrap_or(7),
    }
}

/// Environment lookup backed by the process environment.
pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

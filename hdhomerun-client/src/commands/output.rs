// Output formatting functions

use std::fmt::{self, Write as _};

use colored::Colorize;
use serde::Serialize;

use hdhomerun_client::protocol::{DeviceMap, FeatureMap, ScanResult, TunerStatus};

use crate::context::OutputFormat;

/// Text produced by a subcommand, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rendered(String);

impl Rendered {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type RenderResult = Result<Rendered, serde_json::Error>;

fn json<T: Serialize + ?Sized>(value: &T) -> RenderResult {
    serde_json::to_string_pretty(value).map(Rendered)
}

pub(super) fn devices(devices: &DeviceMap, format: OutputFormat) -> RenderResult {
    if format == OutputFormat::Json {
        return json(devices);
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!("{:<10} {:<40} {}", "Device", "IP", "Tuners").bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(60));
    for (id, device) in devices {
        let tuners = device
            .tuners
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let _ = writeln!(out, "{:<10} {:<40} {}", id.green(), device.ip, tuners);
    }
    let _ = write!(out, "\nTotal: {} devices", devices.len());
    Ok(Rendered(out))
}

pub(super) fn features(features: &FeatureMap, format: OutputFormat) -> RenderResult {
    if format == OutputFormat::Json {
        return json(features);
    }

    let width = features.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (name, values) in features {
        let _ = writeln!(
            out,
            "{}: {}",
            format!("{:<width$}", name, width = width).bold(),
            values.join(" ")
        );
    }
    Ok(Rendered(out.trim_end().to_string()))
}

pub(super) fn scan(channels: &ScanResult, format: OutputFormat) -> RenderResult {
    if format == OutputFormat::Json {
        return json(channels);
    }

    if channels.is_empty() {
        return Ok(Rendered("No channels found.".to_string()));
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<5} {:<12} {:<14} {:<7} {:<8} {}",
            "Ch", "Channel", "Lock", "TSID", "Program", "Name"
        )
        .bold()
    );
    let _ = writeln!(out, "{}", "-".repeat(70));

    for (number, channel) in channels {
        let tsid = channel.tsid.as_deref().unwrap_or("-");
        if channel.programs.is_empty() {
            let _ = writeln!(
                out,
                "{:<5} {:<12} {:<14} {:<7} {}",
                number,
                channel.internal_channel,
                channel.lock,
                tsid,
                "(no programs)".yellow()
            );
            continue;
        }
        for (program, info) in &channel.programs {
            let name = if info.friendly_name.is_empty() {
                "-"
            } else {
                info.friendly_name.as_str()
            };
            let _ = writeln!(
                out,
                "{:<5} {:<12} {:<14} {:<7} {:<8} {} {}",
                number,
                channel.internal_channel,
                channel.lock,
                tsid,
                program,
                info.friendly_number.cyan(),
                name
            );
        }
    }

    let programs: usize = channels.values().map(|c| c.programs.len()).sum();
    let _ = write!(
        out,
        "\nTotal: {} channels, {} programs",
        channels.len(),
        programs
    );
    Ok(Rendered(out))
}

pub(super) fn status(status: &TunerStatus, format: OutputFormat) -> RenderResult {
    if format == OutputFormat::Json {
        return json(status);
    }

    let mut out = String::new();
    for (key, value) in status {
        let value = if key == "lock" && value != "none" {
            value.green().to_string()
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "  {:<6} {}", format!("{}:", key), value);
    }
    Ok(Rendered(out.trim_end().to_string()))
}

pub(super) fn target(target: &str, format: OutputFormat) -> RenderResult {
    match format {
        OutputFormat::Json => json(&serde_json::json!({ "target": target })),
        OutputFormat::Table => Ok(Rendered(target.to_string())),
    }
}

pub(super) fn message(text: String, format: OutputFormat) -> RenderResult {
    match format {
        OutputFormat::Json => json(&serde_json::json!({ "result": text })),
        OutputFormat::Table => Ok(Rendered(text)),
    }
}

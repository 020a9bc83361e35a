//! Subcommand handlers for hdhrctl.

mod output;

use log::info;

use hdhomerun_client::{Client, ClientError, ClientResult, CommandExecutor, Severity};

use crate::config::Settings;
use crate::context::{Commands, OutputFormat, TargetAction};
use output::Rendered;

/// Tuner used when neither the command line nor the config names one.
const DEFAULT_TUNER: u32 = 0;

/// Run one subcommand and return what should be printed.
pub(crate) fn run<E: CommandExecutor>(
    client: &mut Client<E>,
    settings: &Settings,
    command: Commands,
    format: OutputFormat,
) -> Result<Rendered, Box<dyn std::error::Error>> {
    let rendered = match command {
        Commands::Discover => {
            let devices = client.discover()?;
            output::devices(&devices, format)?
        }
        Commands::Features => {
            let device = select_device(client, settings)?;
            let features = client.get_features(&device)?;
            output::features(&features, format)?
        }
        Commands::Scan { channel_map } => {
            let (device, tuner) = prepare_tuner(client, settings)?;
            if let Some(channel_map) = channel_map {
                client.set_current_channel_map(&channel_map)?;
            }
            info!("Scanning tuner {} on device {}", tuner, device);
            let channels = client.scan()?;
            output::scan(&channels, format)?
        }
        Commands::Status => {
            prepare_tuner(client, settings)?;
            let status = client.get_tuner_status(None, None)?;
            output::status(&status, format)?
        }
        Commands::Tune { channel, program } => {
            prepare_tuner(client, settings)?;
            client.set_current_channel(&channel)?;
            if let Some(program) = program {
                client.set_current_program(program)?;
            }
            output::message(format!("Tuned to {}", describe_tuning(client)), format)?
        }
        Commands::ChannelMap { channel_map } => {
            prepare_tuner(client, settings)?;
            client.set_current_channel_map(&channel_map)?;
            output::message(format!("Channel map set to {}", channel_map), format)?
        }
        Commands::Target { action } => {
            prepare_tuner(client, settings)?;
            match action {
                TargetAction::Get => {
                    let target = client.get_target()?;
                    output::target(target.trim(), format)?
                }
                TargetAction::Set { ip, port, protocol } => {
                    let protocol = protocol.into();
                    client.set_target(ip, port, protocol)?;
                    output::message(
                        format!(
                            "Target set to {}",
                            hdhomerun_client::target_url(ip, port, protocol)
                        ),
                        format,
                    )?
                }
            }
        }
    };
    Ok(rendered)
}

/// Use the configured device, or the first one discovery reports.
fn select_device<E: CommandExecutor>(
    client: &mut Client<E>,
    settings: &Settings,
) -> ClientResult<String> {
    let device = match &settings.device {
        Some(device) => device.clone(),
        None => {
            // a blank response parses to an empty map rather than the sentinel
            let first = match client.discover()?.keys().next() {
                Some(first) => first.clone(),
                None => {
                    let err = ClientError::DeviceDiscovery;
                    client.log(&err.to_string(), Severity::Error);
                    return Err(err);
                }
            };
            info!("No device given, using {}", first);
            first
        }
    };
    client.set_current_device_id(device.clone());
    Ok(device)
}

/// Select the device and then the tuner on it.
fn prepare_tuner<E: CommandExecutor>(
    client: &mut Client<E>,
    settings: &Settings,
) -> ClientResult<(String, u32)> {
    let device = select_device(client, settings)?;
    let tuner = settings.tuner.unwrap_or(DEFAULT_TUNER);
    client.set_current_tuner_id(tuner)?;
    Ok((device, tuner))
}

fn describe_tuning<E: CommandExecutor>(client: &Client<E>) -> String {
    let session = client.session();
    let mut text = session.channel().unwrap_or_default().to_string();
    if let Ok(program) = session.program() {
        text.push_str(&format!(" program {}", program));
    }
    text
}

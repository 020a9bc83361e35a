use clap::Parser;
use log::{debug, error, info};

use hdhomerun_client::{Client, ClientError, FixedTuners, LogCrateSink, ProcessExecutor};

mod commands;
mod config;
mod context;
mod logging;

use crate::config::{find_config, load_config, process_env, resolve, ConfigFile, Overrides};
use crate::context::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = find_config(cli.config.clone());
    let file = match &config_path {
        Some(path) => load_config(path)
            .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?,
        None => ConfigFile::default(),
    };

    let settings = resolve(
        Overrides {
            command: cli.command.clone(),
            device: cli.device.clone(),
            tuner: cli.tuner,
        },
        file,
        process_env,
    );

    let guard = logging::init_logging(
        cli.verbose,
        settings.log_level.as_deref(),
        settings.log_dir.as_deref(),
        settings.log_retention_days,
    )?;

    if let Some(path) = &config_path {
        info!("Loaded config from {}", path.display());
    }
    debug!("Resolved settings: {:?}", settings);
    info!("Using {}", settings.command.display());

    let mut client = Client::new(ProcessExecutor::new(settings.command.clone()))
        .with_logger(LogCrateSink)
        .with_tuner_source(FixedTuners::new(settings.tuners.iter().copied()));

    match commands::run(&mut client, &settings, cli.command_kind, cli.format) {
        Ok(rendered) => {
            println!("{}", rendered.as_str());
            Ok(())
        }
        Err(e) => {
            if !reported_by_client(e.as_ref()) {
                error!("{}", e);
            }
            drop(guard);
            std::process::exit(1);
        }
    }
}

/// Client failures are already logged at ERROR through [`LogCrateSink`].
fn reported_by_client(err: &(dyn std::error::Error + 'static)) -> bool {
    err.is::<ClientError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_not_reported_twice() {
        let client: Box<dyn std::error::Error> = Box::new(ClientError::DeviceDiscovery);
        assert!(reported_by_client(client.as_ref()));

        let render: Box<dyn std::error::Error> =
            Box::new(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(!reported_by_client(render.as_ref()));
    }
}

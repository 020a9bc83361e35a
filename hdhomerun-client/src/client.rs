//! Client façade: issues commands, parses responses and keeps the session.

use std::collections::BTreeSet;
use std::net::IpAddr;

use hdhomerun_protocol::{
    parse_discovery, parse_features, parse_scan_with, parse_status, CommandLine, DeviceMap,
    FeatureMap, ScanResult, StreamProtocol, TunerCommand, TunerStatus, DISCOVER_COMMAND,
    SYS_FEATURES_COMMAND,
};

use crate::error::{ClientError, ClientResult};
use crate::executor::CommandExecutor;
use crate::log_sink::{LogSink, NullLog, Severity};
use crate::session::Session;
use crate::tuners::{FixedTuners, TunerSource};

/// Control client for one appliance session.
///
/// Every failing operation logs its error at [`Severity::Error`] before
/// returning it. Nothing is retried.
pub struct Client<E> {
    executor: E,
    tuners: Box<dyn TunerSource>,
    logger: Box<dyn LogSink>,
    session: Session,
}

impl<E: CommandExecutor> Client<E> {
    /// Create a client with the default tuner set and no logging.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            tuners: Box::new(FixedTuners::default()),
            logger: Box::new(NullLog),
            session: Session::new(),
        }
    }

    pub fn with_logger(mut self, logger: impl LogSink + 'static) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn with_tuner_source(mut self, tuners: impl TunerSource + 'static) -> Self {
        self.tuners = Box::new(tuners);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Log a message through the configured sink.
    pub fn log(&self, message: &str, severity: Severity) {
        self.logger.log(message, severity);
    }

    // ---- session accessors ----

    pub fn current_device_id(&self) -> ClientResult<&str> {
        self.logged(self.session.device_id().map_err(ClientError::from))
    }

    pub fn current_tuner_id(&self) -> ClientResult<u32> {
        self.logged(self.session.tuner_id().map_err(ClientError::from))
    }

    pub fn current_channel_map(&self) -> ClientResult<&str> {
        self.logged(self.session.channel_map().map_err(ClientError::from))
    }

    pub fn current_channel(&self) -> ClientResult<&str> {
        self.logged(self.session.channel().map_err(ClientError::from))
    }

    pub fn current_program(&self) -> ClientResult<u32> {
        self.logged(self.session.program().map_err(ClientError::from))
    }

    pub fn set_current_device_id(&mut self, device_id: impl Into<String>) {
        self.session.set_device_id(device_id);
    }

    /// Select a tuner of the current device.
    pub fn set_current_tuner_id(&mut self, tuner_id: u32) -> ClientResult<()> {
        let result = self.apply_tuner_id(tuner_id);
        self.logged(result)
    }

    /// Validate a channel map against the device features, send it to the
    /// current tuner and then record it.
    pub fn set_current_channel_map(&mut self, channel_map: &str) -> ClientResult<()> {
        let result = self.apply_channel_map(channel_map);
        self.logged(result)
    }

    /// Tune the current tuner to `channel` (e.g. `auto:183000000`).
    pub fn set_current_channel(&mut self, channel: &str) -> ClientResult<()> {
        let result = self
            .exec_tuner(TunerCommand::SetChannel, None, None, &[channel.to_string()])
            .map(|_| self.session.commit_channel(channel));
        self.logged(result)
    }

    /// Select a program on the tuned channel.
    pub fn set_current_program(&mut self, program: u32) -> ClientResult<()> {
        let result = self
            .exec_tuner(TunerCommand::SetProgram, None, None, &[program.to_string()])
            .map(|_| self.session.commit_program(program));
        self.logged(result)
    }

    // ---- device queries ----

    /// Tuner indices of `device_id`.
    pub fn get_tuners(&self, device_id: &str) -> ClientResult<BTreeSet<u32>> {
        self.logged(self.tuners.tuners(device_id))
    }

    /// Discover devices on the network.
    pub fn discover(&self) -> ClientResult<DeviceMap> {
        let result = self.exec(CommandLine::new(DISCOVER_COMMAND)).and_then(|response| {
            parse_discovery(&response, |id: &str| self.tuners.tuners(id))
        });

        if let Ok(devices) = &result {
            self.log(&format!("discovered devices: {:?}", devices), Severity::Debug);
        }
        self.logged(result)
    }

    /// Features of `device_id` (supported channel maps, modulations, ...).
    pub fn get_features(&self, device_id: &str) -> ClientResult<FeatureMap> {
        let result = self.query_features(device_id);
        self.logged(result)
    }

    /// Scan all channels on the current tuner.
    pub fn scan(&self) -> ClientResult<ScanResult> {
        let result = self
            .exec_tuner(TunerCommand::Scan, None, None, &[])
            .and_then(|response| {
                let channels = parse_scan_with(&response, |friendly, channel| {
                    if channel.programs.is_empty() {
                        self.log(
                            &format!(
                                "Odd ... found no programs for channel {} ({})",
                                friendly, channel.internal_channel
                            ),
                            Severity::Info,
                        );
                    }
                })?;
                Ok(channels)
            });

        if let Ok(channels) = &result {
            self.log(
                &format!("Found these channels during scan: {:?}", channels),
                Severity::Debug,
            );
        }
        self.logged(result)
    }

    /// Status of a tuner. Unset arguments default to the current session.
    pub fn get_tuner_status(
        &self,
        tuner_id: Option<u32>,
        device_id: Option<&str>,
    ) -> ClientResult<TunerStatus> {
        let result = self.resolve(tuner_id, device_id).and_then(|(tuner, device)| {
            let response = self.exec_tuner(TunerCommand::Status, Some(tuner), Some(&device), &[])?;
            let status = parse_status(&response)?;
            self.log(
                &format!(
                    "Checking status of tuner {} on device {}: {:?}",
                    tuner, device, status
                ),
                Severity::Debug,
            );
            Ok(status)
        });
        self.logged(result)
    }

    /// Stream the current tuner to `protocol://ip:port`.
    pub fn set_target(&self, ip: IpAddr, port: u16, protocol: StreamProtocol) -> ClientResult<()> {
        let result = self.resolve(None, None).and_then(|(tuner, device)| {
            let target = target_url(ip, port, protocol);
            self.log(
                &format!(
                    "Setting tuner {}, device {} to target {}.",
                    tuner, device, target
                ),
                Severity::Info,
            );
            self.exec_tuner(TunerCommand::SetTarget, Some(tuner), Some(&device), &[target])
                .map(|_| ())
        });
        self.logged(result)
    }

    /// Streaming target of the current tuner, as printed by the device.
    pub fn get_target(&self) -> ClientResult<String> {
        let result = self.resolve(None, None).and_then(|(tuner, device)| {
            let response = self.exec_tuner(TunerCommand::GetTarget, Some(tuner), Some(&device), &[])?;
            self.log(
                &format!(
                    "Found target for tuner {}, device {}: {}",
                    tuner,
                    device,
                    response.trim_end()
                ),
                Severity::Debug,
            );
            Ok(response)
        });
        self.logged(result)
    }

    // ---- internals ----

    fn apply_tuner_id(&mut self, tuner_id: u32) -> ClientResult<()> {
        let device = self.session.device_id()?;
        let tuners = self.tuners.tuners(device)?;
        self.session.set_tuner_id(tuner_id, &tuners)?;
        Ok(())
    }

    fn apply_channel_map(&mut self, channel_map: &str) -> ClientResult<()> {
        let device = self.session.device_id()?.to_string();
        let tuner = self.session.tuner_id()?;

        let features = self.query_features(&device)?;
        self.session.check_channel_map(channel_map, &features)?;

        self.exec_tuner(
            TunerCommand::SetChannelMap,
            Some(tuner),
            Some(&device),
            &[channel_map.to_string()],
        )?;
        self.session.commit_channel_map(channel_map);
        Ok(())
    }

    fn query_features(&self, device_id: &str) -> ClientResult<FeatureMap> {
        let response = self.exec(CommandLine::new(SYS_FEATURES_COMMAND).device(device_id))?;
        let features = parse_features(&response)?;
        self.log(
            &format!("features for {}: {:?}", device_id, features),
            Severity::Debug,
        );
        Ok(features)
    }

    /// Fill in the tuner and device from the session where not given.
    fn resolve(&self, tuner_id: Option<u32>, device_id: Option<&str>) -> ClientResult<(u32, String)> {
        let tuner = match tuner_id {
            Some(tuner) => tuner,
            None => self.session.tuner_id()?,
        };
        let device = match device_id {
            Some(device) => device.to_string(),
            None => self.session.device_id()?.to_string(),
        };
        Ok((tuner, device))
    }

    fn exec_tuner(
        &self,
        command: TunerCommand,
        tuner_id: Option<u32>,
        device_id: Option<&str>,
        params: &[String],
    ) -> ClientResult<String> {
        let (tuner, device) = self.resolve(tuner_id, device_id)?;
        let line = params
            .iter()
            .fold(CommandLine::tuner(command, tuner, device), |line, param| {
                line.param(param)
            });
        self.exec(line)
    }

    fn exec(&self, command: CommandLine) -> ClientResult<String> {
        let response = self.executor.execute(&command)?;
        self.log(
            &format!(
                "Executing CMD: '{}' ...\n... Response: '{}'.",
                command, response
            ),
            Severity::Debug,
        );
        Ok(response)
    }

    fn logged<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        result.map_err(|err| {
            self.log(&err.to_string(), Severity::Error);
            err
        })
    }
}

/// Target parameter in the form the device expects: `protocol://ip:port`.
pub fn target_url(ip: IpAddr, port: u16, protocol: StreamProtocol) -> String {
    match ip {
        IpAddr::V4(ip) => format!("{}://{}:{}", protocol, ip, port),
        IpAddr::V6(ip) => format!("{}://[{}]:{}", protocol, ip, port),
    }
}

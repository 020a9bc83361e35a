//! Command lines understood by `hdhomerun_config`.
//!
//! Layout of a command line (the tool path is prepended by the executor):
//! ```text
//! [<device id>] <command words...> [<param>...]
//! ```

use std::fmt;

/// Placeholder substituted with the tuner index in tuner command templates.
pub const TUNER_PLACEHOLDER: &str = "{tuner}";

/// Discover devices on the local network.
pub const DISCOVER_COMMAND: &str = "discover";

/// List device features (channel maps, modulations, ...).
pub const SYS_FEATURES_COMMAND: &str = "get /sys/features";

/// Commands addressed to a single tuner of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TunerCommand {
    SetChannelMap,
    Scan,
    SetChannel,
    Status,
    SetProgram,
    SetTarget,
    GetTarget,
}

impl TunerCommand {
    /// Template with a single [`TUNER_PLACEHOLDER`].
    pub fn template(self) -> &'static str {
        match self {
            TunerCommand::SetChannelMap => "set /tuner{tuner}/channelmap",
            TunerCommand::Scan => "scan /tuner{tuner}",
            TunerCommand::SetChannel => "set /tuner{tuner}/channel",
            TunerCommand::Status => "get /tuner{tuner}/status",
            TunerCommand::SetProgram => "set /tuner{tuner}/program",
            TunerCommand::SetTarget => "set /tuner{tuner}/target",
            TunerCommand::GetTarget => "get /tuner{tuner}/target",
        }
    }

    /// Template with the tuner index substituted.
    pub fn render(self, tuner_id: u32) -> String {
        build(self.template(), tuner_id)
    }
}

/// Substitute `tuner_id` for the placeholder in `template`.
pub fn build(template: &str, tuner_id: u32) -> String {
    template.replacen(TUNER_PLACEHOLDER, &tuner_id.to_string(), 1)
}

/// A fully formed command line, minus the tool path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    device_id: Option<String>,
    command: String,
    params: Vec<String>,
}

impl CommandLine {
    /// Command not addressed to any device (e.g. `discover`).
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            device_id: None,
            command: command.into(),
            params: Vec::new(),
        }
    }

    /// Tuner command for `tuner_id` on `device_id`.
    pub fn tuner(command: TunerCommand, tuner_id: u32, device_id: impl Into<String>) -> Self {
        Self::new(command.render(tuner_id)).device(device_id)
    }

    /// Address the command to a device. An empty id leaves it unaddressed.
    pub fn device(mut self, device_id: impl Into<String>) -> Self {
        let device_id = device_id.into();
        self.device_id = (!device_id.is_empty()).then_some(device_id);
        self
    }

    /// Append one parameter after the command.
    pub fn param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Arguments to pass to the tool, in order.
    pub fn args(&self) -> Vec<&str> {
        self.device_id
            .as_deref()
            .into_iter()
            .chain(self.command.split_whitespace())
            .chain(self.params.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}

//! Error types for the control client.

use std::process::ExitStatus;

use thiserror::Error;

use hdhomerun_protocol::ProtocolError;

/// Session state is missing or a proposed value was rejected by the device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No current device ID set.")]
    NoDevice,

    #[error("No tuner ID currently set.")]
    NoTuner,

    #[error("No current channel map set.")]
    NoChannelMap,

    #[error("No channel currently set.")]
    NoChannel,

    #[error("No program currently set.")]
    NoProgram,

    #[error("Invalid tuner ID {tuner}. Device {device} supports these tuner IDs: {}", join(.valid))]
    InvalidTuner {
        tuner: u32,
        device: String,
        valid: Vec<u32>,
    },

    #[error("{channel_map} is not an available channel map. Device {device} supports these channel maps: {}", join(.valid))]
    InvalidChannelMap {
        channel_map: String,
        device: String,
        valid: Vec<String>,
    },
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The command executor could not produce a response.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The tool could not be started.
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure.
    #[error("'{command}' exited with {status}: {stderr}")]
    ExitStatus {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The tool printed something that is not text.
    #[error("'{command}' produced non UTF-8 output")]
    InvalidOutput { command: String },

    /// Any other executor failure.
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by [`Client`](crate::Client) operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A session field is unset, or a value failed validation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A response did not match its grammar.
    #[error(transparent)]
    Format(ProtocolError),

    /// Discovery reported that no device answered.
    #[error("No devices found")]
    DeviceDiscovery,

    /// The command executor failed.
    #[error(transparent)]
    Execution(#[from] ExecError),
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::NoDevicesFound => ClientError::DeviceDiscovery,
            other => ClientError::Format(other),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tuner_message_lists_valid_ids() {
        let err = ConfigurationError::InvalidTuner {
            tuner: 5,
            device: "103440A8".into(),
            valid: vec![0, 1],
        };
        assert_eq!(
            err.to_string(),
            "Invalid tuner ID 5. Device 103440A8 supports these tuner IDs: 0, 1"
        );
    }

    #[test]
    fn test_invalid_channel_map_message() {
        let err = ConfigurationError::InvalidChannelMap {
            channel_map: "x".into(),
            device: "103440A8".into(),
            valid: vec!["us-bcast".into(), "us-cable".into()],
        };
        assert!(err.to_string().starts_with("x is not an available channel map."));
        assert!(err.to_string().ends_with("us-bcast, us-cable"));
    }

    #[test]
    fn test_protocol_error_classification() {
        assert!(matches!(
            ClientError::from(ProtocolError::NoDevicesFound),
            ClientError::DeviceDiscovery
        ));
        assert!(matches!(
            ClientError::from(ProtocolError::MalformedStatusToken("ss".into())),
            ClientError::Format(ProtocolError::MalformedStatusToken(_))
        ));
    }
}

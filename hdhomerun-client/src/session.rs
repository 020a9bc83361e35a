//! Session state: the device, tuner, channel map, channel and program the
//! client is currently working with.
//!
//! A [`Session`] only holds and validates values. Querying the device for
//! the data a value is validated against is done by the
//! [`Client`](crate::Client), which owns the session.

use std::collections::BTreeSet;

use hdhomerun_protocol::{FeatureMap, FEATURES_CHANNELMAP_KEY};

use crate::error::ConfigurationError;

/// Mutable state for one appliance session. Not meant to be shared across
/// threads; hold one per (device, tuner) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    device_id: Option<String>,
    tuner_id: Option<u32>,
    channel_map: Option<String>,
    channel: Option<String>,
    program: Option<u32>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device_id(&self) -> Result<&str, ConfigurationError> {
        self.device_id.as_deref().ok_or(ConfigurationError::NoDevice)
    }

    pub fn tuner_id(&self) -> Result<u32, ConfigurationError> {
        self.tuner_id.ok_or(ConfigurationError::NoTuner)
    }

    pub fn channel_map(&self) -> Result<&str, ConfigurationError> {
        self.channel_map
            .as_deref()
            .ok_or(ConfigurationError::NoChannelMap)
    }

    pub fn channel(&self) -> Result<&str, ConfigurationError> {
        self.channel.as_deref().ok_or(ConfigurationError::NoChannel)
    }

    pub fn program(&self) -> Result<u32, ConfigurationError> {
        self.program.ok_or(ConfigurationError::NoProgram)
    }

    /// Set the current device. Not validated.
    pub fn set_device_id(&mut self, device_id: impl Into<String>) {
        self.device_id = Some(device_id.into());
    }

    /// Set the current tuner if it belongs to the current device's `tuners`.
    pub fn set_tuner_id(
        &mut self,
        tuner_id: u32,
        tuners: &BTreeSet<u32>,
    ) -> Result<(), ConfigurationError> {
        let device = self.device_id()?;
        if !tuners.contains(&tuner_id) {
            return Err(ConfigurationError::InvalidTuner {
                tuner: tuner_id,
                device: device.to_string(),
                valid: tuners.iter().copied().collect(),
            });
        }

        self.tuner_id = Some(tuner_id);
        Ok(())
    }

    /// Check `channel_map` against the device's `channelmap` feature.
    ///
    /// A device that does not list a `channelmap` feature accepts anything.
    pub fn check_channel_map(
        &self,
        channel_map: &str,
        features: &FeatureMap,
    ) -> Result<(), ConfigurationError> {
        let device = self.device_id()?;
        match features.get(FEATURES_CHANNELMAP_KEY) {
            Some(valid) if !valid.iter().any(|m| m == channel_map) => {
                Err(ConfigurationError::InvalidChannelMap {
                    channel_map: channel_map.to_string(),
                    device: device.to_string(),
                    valid: valid.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Commit a channel map that was already checked and sent to the device.
    pub fn commit_channel_map(&mut self, channel_map: impl Into<String>) {
        self.channel_map = Some(channel_map.into());
    }

    pub fn commit_channel(&mut self, channel: impl Into<String>) {
        self.channel = Some(channel.into());
    }

    pub fn commit_program(&mut self, program: u32) {
        self.program = Some(program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_on(device: &str) -> Session {
        let mut session = Session::new();
        session.set_device_id(device);
        session
    }

    fn features(channel_maps: Option<&[&str]>) -> FeatureMap {
        let mut features = FeatureMap::new();
        features.insert("modulation".into(), vec!["8vsb".into()]);
        if let Some(maps) = channel_maps {
            features.insert(
                FEATURES_CHANNELMAP_KEY.into(),
                maps.iter().map(|m| m.to_string()).collect(),
            );
        }
        features
    }

    #[test]
    fn test_unset_getters_fail() {
        let session = Session::new();
        assert_eq!(session.device_id(), Err(ConfigurationError::NoDevice));
        assert_eq!(session.tuner_id(), Err(ConfigurationError::NoTuner));
        assert_eq!(session.channel_map(), Err(ConfigurationError::NoChannelMap));
        assert_eq!(session.channel(), Err(ConfigurationError::NoChannel));
        assert_eq!(session.program(), Err(ConfigurationError::NoProgram));
    }

    #[test]
    fn test_set_tuner_requires_device() {
        let mut session = Session::new();
        let err = session.set_tuner_id(0, &BTreeSet::from([0, 1])).unwrap_err();
        assert_eq!(err, ConfigurationError::NoDevice);
    }

    #[test]
    fn test_set_tuner_outside_tuner_set() {
        let mut session = session_on("103440A8");
        let err = session.set_tuner_id(5, &BTreeSet::from([0, 1])).unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::InvalidTuner {
                tuner: 5,
                device: "103440A8".into(),
                valid: vec![0, 1],
            }
        );
        assert_eq!(session.tuner_id(), Err(ConfigurationError::NoTuner));
    }

    #[test]
    fn test_set_tuner_in_tuner_set() {
        let mut session = session_on("103440A8");
        session.set_tuner_id(1, &BTreeSet::from([0, 1])).unwrap();
        assert_eq!(session.tuner_id(), Ok(1));
    }

    #[test]
    fn test_channel_map_without_feature_is_accepted() {
        let session = session_on("103440A8");
        assert!(session.check_channel_map("x", &features(None)).is_ok());
    }

    #[test]
    fn test_channel_map_not_listed_is_rejected() {
        let session = session_on("103440A8");
        let err = session
            .check_channel_map("x", &features(Some(&["us-bcast", "us-cable"])))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::InvalidChannelMap {
                channel_map: "x".into(),
                device: "103440A8".into(),
                valid: vec!["us-bcast".into(), "us-cable".into()],
            }
        );
    }

    #[test]
    fn test_channel_map_listed_is_accepted() {
        let mut session = session_on("103440A8");
        session
            .check_channel_map("us-cable", &features(Some(&["us-bcast", "us-cable"])))
            .unwrap();
        session.commit_channel_map("us-cable");
        assert_eq!(session.channel_map(), Ok("us-cable"));
    }

    #[test]
    fn test_commit_channel_and_program() {
        let mut session = Session::new();
        session.commit_channel("auto:183000000");
        session.commit_program(3);
        assert_eq!(session.channel(), Ok("auto:183000000"));
        assert_eq!(session.program(), Ok(3));
    }
}

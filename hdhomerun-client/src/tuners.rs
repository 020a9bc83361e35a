//! Source of the tuner indices a device offers.

use std::collections::BTreeSet;

use hdhomerun_protocol::DEFAULT_TUNERS;

use crate::error::ClientResult;

/// Reports which tuner indices exist on a device.
pub trait TunerSource {
    fn tuners(&self, device_id: &str) -> ClientResult<BTreeSet<u32>>;
}

/// The same tuner set for every device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTuners {
    tuners: BTreeSet<u32>,
}

impl FixedTuners {
    pub fn new(tuners: impl IntoIterator<Item = u32>) -> Self {
        Self {
            tuners: tuners.into_iter().collect(),
        }
    }
}

impl Default for FixedTuners {
    fn default() -> Self {
        Self::new(DEFAULT_TUNERS)
    }
}

impl TunerSource for FixedTuners {
    fn tuners(&self, _device_id: &str) -> ClientResult<BTreeSet<u32>> {
        Ok(self.tuners.clone())
    }
}

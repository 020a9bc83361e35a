//! Parser for the `get /sys/features` response.
//!
//! ```text
//! channelmap: us-bcast us-cable us-hrc us-irc
//! modulation: 8vsb qam256 qam64
//! ```

use crate::error::ProtocolError;
use crate::tokenize::{split_pair, tokenize};
use crate::types::FeatureMap;

/// Parse a feature listing into a map of feature name to values.
///
/// A repeated key replaces the earlier values.
pub fn parse_features(response: &str) -> Result<FeatureMap, ProtocolError> {
    let mut features = FeatureMap::new();

    for line in tokenize("\n", response) {
        let (key, rest) = split_pair(':', line)
            .ok_or_else(|| ProtocolError::MalformedFeatureLine(line.to_string()))?;
        let values = tokenize(" ", rest).into_iter().map(str::to_string).collect();
        features.insert(key.to_string(), values);
    }

    Ok(features)
}

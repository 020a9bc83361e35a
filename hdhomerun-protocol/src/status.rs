//! Parser for the `get /tunerN/status` response.
//!
//! ```text
//! ch=8vsb:183000000 lock=8vsb ss=83 snq=90 seq=100 bps=19394080 pps=0
//! ```

use crate::error::ProtocolError;
use crate::tokenize::{split_pair, tokenize};
use crate::types::TunerStatus;

/// Parse a status line into raw `key -> value` pairs.
///
/// Values are kept as printed; `ch=8vsb:183000000` yields `"8vsb:183000000"`.
pub fn parse_status(response: &str) -> Result<TunerStatus, ProtocolError> {
    let mut status = TunerStatus::new();

    for token in tokenize(" ", response) {
        match split_pair('=', token) {
            Some((key, value)) if !key.is_empty() => {
                status.insert(key.to_string(), value.to_string());
            }
            _ => return Err(ProtocolError::MalformedStatusToken(token.to_string())),
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal_values() {
        let status = parse_status("ss=100 snq=95 seq=100").unwrap();

        let pairs: Vec<(&str, &str)> = status
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("ss", "100"), ("snq", "95"), ("seq", "100")]);
    }

    #[test]
    fn test_parse_full_status_line() {
        let status = parse_status(
            "ch=8vsb:183000000 lock=8vsb ss=83 snq=90 seq=100 bps=19394080 pps=0\n",
        )
        .unwrap();

        assert_eq!(status["ch"], "8vsb:183000000");
        assert_eq!(status["lock"], "8vsb");
        assert_eq!(status["pps"], "0");
        assert_eq!(status.len(), 7);
    }

    #[test]
    fn test_token_without_equals_is_format_error() {
        let err = parse_status("ss=100 snq seq=100").unwrap_err();
        assert_eq!(err, ProtocolError::MalformedStatusToken("snq".into()));
    }

    #[test]
    fn test_empty_key_is_format_error() {
        assert!(parse_status("=100").is_err());
    }

    #[test]
    fn test_empty_value_is_kept() {
        let status = parse_status("lock= ss=0").unwrap();
        assert_eq!(status["lock"], "");
    }
}

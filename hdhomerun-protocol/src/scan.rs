//! Parser for the `scan /tunerN` report.
//!
//! The report is a sequence of records without fixed boundaries:
//!
//! ```text
//! SCAN: 57000000 (us-bcast:2)
//! LOCK: none (ss=45 snq=0 seq=0)
//! SCAN: 63000000 (us-bcast:3)
//! LOCK: 8vsb (ss=80 snq=70 seq=100)
//! TSID: 0x0457
//! PROGRAM 1: 3.1 WBTV-HD
//! PROGRAM 2: 3.2 WBTV-SD
//! ```
//!
//! Each record is a scan line followed by a `LOCK:` result line. Locked
//! records may carry a `TSID:` line and any number of `PROGRAM` lines; the
//! first line that is neither starts the next record.

use indexmap::IndexMap;

use crate::error::ProtocolError;
use crate::tokenize::{leading_number, tokenize};
use crate::types::{
    ProgramInfo, ScanResult, ScannedChannel, LOCK_NONE, LOCK_PREFIX, PROGRAM_PREFIX, TSID_PREFIX,
};

/// Forward-only cursor over the non-empty lines of a response.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor over the non-empty, trimmed lines of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: tokenize("\n", text),
            pos: 0,
        }
    }

    /// Look at the next line without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume the next line.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the next line only if `accept` returns true for it.
    pub fn next_if(&mut self, accept: impl FnOnce(&str) -> bool) -> Option<&'a str> {
        match self.peek() {
            Some(line) if accept(line) => self.next_line(),
            _ => None,
        }
    }

    /// Number of lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }
}

/// Where the parser is inside the current record.
enum ScanState<'a> {
    ExpectScanLine,
    ExpectResultLine {
        scan_line: &'a str,
    },
    ConsumePrograms {
        friendly_channel: u32,
        channel: ScannedChannel,
    },
}

/// Parse a scan report into the locked channels keyed by friendly number.
///
/// Unlocked records contribute nothing. A locked record without programs is
/// still recorded, with an empty program map. A later record with the same
/// friendly number replaces the earlier one.
pub fn parse_scan(response: &str) -> Result<ScanResult, ProtocolError> {
    parse_scan_with(response, |_, _| {})
}

/// Like [`parse_scan`], calling `on_channel` for every locked record as it
/// completes, including records a later one replaces.
pub fn parse_scan_with(
    response: &str,
    mut on_channel: impl FnMut(u32, &ScannedChannel),
) -> Result<ScanResult, ProtocolError> {
    let mut cursor = LineCursor::new(response);
    let mut channels = ScanResult::new();
    let mut state = ScanState::ExpectScanLine;

    loop {
        state = match state {
            ScanState::ExpectScanLine => match cursor.next_line() {
                Some(scan_line) => ScanState::ExpectResultLine { scan_line },
                None => break,
            },
            ScanState::ExpectResultLine { scan_line } => {
                let result_line = cursor
                    .next_line()
                    .ok_or_else(|| ProtocolError::MissingResultLine(scan_line.to_string()))?;

                match parse_result_line(result_line)? {
                    None => ScanState::ExpectScanLine,
                    Some(lock) => {
                        let (internal_channel, friendly_channel) = parse_scan_line(scan_line)?;
                        let tsid = cursor
                            .next_if(is_tsid_line)
                            .and_then(|line| tokenize(" ", line).get(1).map(|s| s.to_string()));

                        ScanState::ConsumePrograms {
                            friendly_channel,
                            channel: ScannedChannel {
                                internal_channel,
                                lock,
                                tsid,
                                programs: IndexMap::new(),
                            },
                        }
                    }
                }
            }
            ScanState::ConsumePrograms {
                friendly_channel,
                mut channel,
            } => match cursor.next_if(is_program_line) {
                Some(line) => {
                    let (number, program) = parse_program_line(line)?;
                    channel.programs.insert(number, program);
                    ScanState::ConsumePrograms {
                        friendly_channel,
                        channel,
                    }
                }
                None => {
                    on_channel(friendly_channel, &channel);
                    channels.insert(friendly_channel, channel);
                    ScanState::ExpectScanLine
                }
            },
        };
    }

    Ok(channels)
}

/// Parse a scan line into `(internal channel, friendly channel number)`.
///
/// Token 1 is the internal channel; token 2 is `map:number`.
pub fn parse_scan_line(line: &str) -> Result<(String, u32), ProtocolError> {
    let words = tokenize(" ", line);
    let malformed = || ProtocolError::MalformedScanLine(line.to_string());

    let internal = words.get(1).ok_or_else(malformed)?;
    let friendly = words
        .get(2)
        .and_then(|pair| tokenize(":", pair).get(1).copied())
        .and_then(leading_number)
        .ok_or_else(malformed)?;

    Ok((internal.to_string(), friendly))
}

/// Parse a result line. Returns `None` when no lock was achieved, otherwise
/// the lock modulation.
pub fn parse_result_line(line: &str) -> Result<Option<String>, ProtocolError> {
    match tokenize(" ", line).as_slice() {
        [prefix, lock, ..] if *prefix == LOCK_PREFIX => {
            if *lock == LOCK_NONE {
                Ok(None)
            } else {
                Ok(Some(lock.to_string()))
            }
        }
        _ => Err(ProtocolError::UnexpectedResultLine(line.to_string())),
    }
}

/// Parse a `PROGRAM <n>: <friendly number> <friendly name>` line.
pub fn parse_program_line(line: &str) -> Result<(u32, ProgramInfo), ProtocolError> {
    let words = tokenize(" ", line);
    let malformed = || ProtocolError::MalformedProgramLine(line.to_string());

    let number = words
        .get(1)
        .and_then(|word| leading_number(word))
        .ok_or_else(malformed)?;
    let friendly_number = words.get(2).ok_or_else(malformed)?;
    let friendly_name = words.get(3).copied().unwrap_or_default();

    Ok((
        number,
        ProgramInfo {
            friendly_number: friendly_number.to_string(),
            friendly_name: friendly_name.to_string(),
        },
    ))
}

fn is_program_line(line: &str) -> bool {
    tokenize(" ", line).first() == Some(&PROGRAM_PREFIX)
}

fn is_tsid_line(line: &str) -> bool {
    tokenize(" ", line).first() == Some(&TSID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = "\
SCAN: 57000000 (us-bcast:2)
LOCK: none (ss=45 snq=0 seq=0)
SCAN: 63000000 (us-bcast:3)
LOCK: 8vsb (ss=80 snq=70 seq=100)
PROGRAM 1: 3.1 WBTV-HD
PROGRAM 2: 3.2 WBTV-SD
";

    #[test]
    fn test_cursor_peek_does_not_consume() {
        let mut cursor = LineCursor::new("a\n\nb\n");
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.next_line(), Some("a"));
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.next_if(|line| line == "x"), None);
        assert_eq!(cursor.next_if(|line| line == "b"), Some("b"));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn test_unlocked_and_locked_records() {
        let channels = parse_scan(TWO_RECORDS).unwrap();

        assert_eq!(channels.len(), 1);
        let channel = &channels[&3];
        assert_eq!(channel.internal_channel, "63000000");
        assert_eq!(channel.lock, "8vsb");
        assert_eq!(channel.tsid, None);
        assert_eq!(channel.programs.len(), 2);
        assert_eq!(channel.programs[&1].friendly_number, "3.1");
        assert_eq!(channel.programs[&1].friendly_name, "WBTV-HD");
        assert_eq!(channel.programs[&2].friendly_name, "WBTV-SD");
    }

    #[test]
    fn test_unlocked_record_contributes_nothing() {
        let channels = parse_scan("SCAN: 57000000 (us-bcast:2)\nLOCK: none").unwrap();
        assert!(channels.is_empty());
    }

    #[test]
    fn test_unlocked_record_does_not_consume_following_lines() {
        let report = "\
SCAN: 57000000 (us-bcast:2)
LOCK: none
SCAN: 63000000 (us-bcast:3)
LOCK: 8vsb
PROGRAM 1: 3.1 WBTV-HD
";
        let channels = parse_scan(report).unwrap();
        assert_eq!(channels.keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_locked_record_without_programs() {
        let report = "\
SCAN: 63000000 (us-bcast:3)
LOCK: 8vsb (ss=80 snq=70 seq=100)
SCAN: 69000000 (us-bcast:4)
LOCK: none
";
        let channels = parse_scan(report).unwrap();
        assert_eq!(channels.len(), 1);
        assert!(channels[&3].programs.is_empty());
    }

    #[test]
    fn test_locked_record_at_end_of_input() {
        let channels = parse_scan("SCAN: 63000000 (us-bcast:3)\nLOCK: 8vsb").unwrap();
        assert!(channels[&3].programs.is_empty());
    }

    #[test]
    fn test_tsid_line_is_recorded() {
        let report = "\
SCAN: 63000000 (us-bcast:3)
LOCK: 8vsb (ss=80 snq=70 seq=100)
TSID: 0x0457
PROGRAM 1: 3.1 WBTV-HD
SCAN: 69000000 (us-bcast:4)
LOCK: qam256
TSID: 0x0001
";
        let channels = parse_scan(report).unwrap();
        assert_eq!(channels[&3].tsid.as_deref(), Some("0x0457"));
        assert_eq!(channels[&3].programs.len(), 1);
        assert_eq!(channels[&4].tsid.as_deref(), Some("0x0001"));
        assert_eq!(channels[&4].lock, "qam256");
    }

    #[test]
    fn test_result_line_without_lock_prefix() {
        let err = parse_scan("SCAN: 57000000 (us-bcast:2)\nPROGRAM 1: 3.1 X").unwrap_err();
        assert_eq!(err, ProtocolError::UnexpectedResultLine("PROGRAM 1: 3.1 X".into()));
    }

    #[test]
    fn test_missing_result_line() {
        let err = parse_scan("SCAN: 57000000 (us-bcast:2)").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::MissingResultLine("SCAN: 57000000 (us-bcast:2)".into())
        );
    }

    #[test]
    fn test_friendly_number_collision_last_wins() {
        let report = "\
SCAN: 57000000 (us-bcast:2)
LOCK: 8vsb
PROGRAM 1: 2.1 OLD
SCAN: 59000000 (us-cable:2)
LOCK: qam256
PROGRAM 7: 2.7 NEW
";
        let channels = parse_scan(report).unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[&2].internal_channel, "59000000");
        assert_eq!(channels[&2].programs[&7].friendly_name, "NEW");
        assert!(!channels[&2].programs.contains_key(&1));
    }

    #[test]
    fn test_callback_sees_replaced_records() {
        let report = "\
SCAN: 57000000 (us-bcast:2)
LOCK: 8vsb
SCAN: 59000000 (us-cable:2)
LOCK: qam256
PROGRAM 7: 2.7 NEW
SCAN: 63000000 (us-bcast:3)
LOCK: none
";
        let mut seen = Vec::new();
        let channels = parse_scan_with(report, |number, channel| {
            seen.push((number, channel.internal_channel.clone(), channel.programs.len()));
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (2, "57000000".to_string(), 0),
                (2, "59000000".to_string(), 1),
            ]
        );
        assert_eq!(channels.len(), 1);
    }

    #[test]
    fn test_insertion_follows_scan_order() {
        let report = "\
SCAN: 69000000 (us-bcast:4)
LOCK: 8vsb
SCAN: 57000000 (us-bcast:2)
LOCK: 8vsb
";
        let channels = parse_scan(report).unwrap();
        assert_eq!(channels.keys().copied().collect::<Vec<_>>(), vec![4, 2]);
    }

    #[test]
    fn test_scan_line_with_several_maps() {
        let (internal, friendly) = parse_scan_line("SCAN: 803000000 (us-cable:131, us-irc:131)").unwrap();
        assert_eq!(internal, "803000000");
        assert_eq!(friendly, 131);
    }

    #[test]
    fn test_malformed_scan_line() {
        let err = parse_scan("SCAN: 57000000\nLOCK: 8vsb").unwrap_err();
        assert_eq!(err, ProtocolError::MalformedScanLine("SCAN: 57000000".into()));
    }

    #[test]
    fn test_program_line_without_name() {
        let (number, program) = parse_program_line("PROGRAM 3: 0").unwrap();
        assert_eq!(number, 3);
        assert_eq!(program.friendly_number, "0");
        assert_eq!(program.friendly_name, "");
    }

    #[test]
    fn test_malformed_program_line() {
        let report = "SCAN: 63000000 (us-bcast:3)\nLOCK: 8vsb\nPROGRAM x";
        let err = parse_scan(report).unwrap_err();
        assert_eq!(err, ProtocolError::MalformedProgramLine("PROGRAM x".into()));
    }

    #[test]
    fn test_result_line_variants() {
        assert_eq!(parse_result_line("LOCK: none (ss=0)").unwrap(), None);
        assert_eq!(parse_result_line("LOCK: 8vsb").unwrap(), Some("8vsb".into()));
        assert!(parse_result_line("LOCK:").is_err());
        assert!(parse_result_line("LOCK:none").is_err());
    }
}

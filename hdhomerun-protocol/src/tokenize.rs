//! Splitting of raw response text into fields.

/// Split `text` on every occurrence of `separator`, trim each piece and drop
/// the pieces that are empty after trimming.
///
/// ```rust
/// use hdhomerun_protocol::tokenize;
///
/// assert_eq!(tokenize(" ", "  ss=100   snq=95 "), vec!["ss=100", "snq=95"]);
/// assert!(tokenize("\n", "\n\n").is_empty());
/// ```
pub fn tokenize<'a>(separator: &str, text: &'a str) -> Vec<&'a str> {
    text.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Split `text` on the first occurrence of `separator`, trimming both halves.
pub(crate) fn split_pair<'a>(separator: char, text: &'a str) -> Option<(&'a str, &'a str)> {
    text.split_once(separator)
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Read the leading decimal digits of `field`, ignoring a leading `(`.
///
/// The appliance decorates numbers (`(us-bcast:2)`, `PROGRAM 3:`), so only
/// the digit run is significant.
pub(crate) fn leading_number(field: &str) -> Option<u32> {
    let field = field.trim_start_matches('(');
    let end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    field[..end].parse().ok()
}

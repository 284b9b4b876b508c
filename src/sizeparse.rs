//! Size-string parsing: a pure function extracted out of the CLI layer,
//! returning a tagged success/failure value instead of a bare string.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeParseError(pub String);

impl fmt::Display for SizeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid size string: {}", self.0)
    }
}

impl std::error::Error for SizeParseError {}

fn grammar() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*([KMGP]?)(i?)B?\s*$").unwrap()
    })
}

/// Parse a size string per the grammar
/// `^\s*([0-9]+(\.[0-9]+)?)\s*([KMGP]?)(i?)B?\s*$` (case-insensitive, base 1024).
/// `"1G"`, `"1.5g"`, `"1GiB"`, `"1024"` are all accepted; the `i` is cosmetic
/// since base is always 1024.
pub fn parse_size(s: &str) -> Result<u64, SizeParseError> {
    let caps = grammar()
        .captures(s)
        .ok_or_else(|| SizeParseError(s.to_string()))?;

    let number: f64 = caps[1].parse().map_err(|_| SizeParseError(s.to_string()))?;
    let unit = caps[2].to_ascii_uppercase();
    let multiplier: f64 = match unit.as_str() {
        "" => 1.0,
        "K" => 1024.0,
        "M" => 1024.0 * 1024.0,
        "G" => 1024.0 * 1024.0 * 1024.0,
        "P" => 1024.0f64.powi(5),
        _ => return Err(SizeParseError(s.to_string())),
    };

    Ok((number * multiplier).round() as u64)
}

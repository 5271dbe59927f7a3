use crate::domain::{SpectrumError, SpectrumResult};
use regex::Regex;
use std::sync::LazyLock;

// ASCII digits only: non-ASCII `\d` matches cannot be parsed as f64.
static DECIMAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.[0-9]+").expect("decimal token pattern is valid"));

/// Builds a search pattern that matches `marker` as literal text anywhere in a line.
pub fn literal_pattern(marker: &str) -> Regex {
    Regex::new(&regex::escape(marker)).expect("escaped literal is always a valid pattern")
}

/// Indices in `[start, end)` whose line contains a match for `pattern`, ascending.
///
/// `end` is clamped to the number of lines.
pub fn find_indices<S: AsRef<str>>(
    lines: &[S],
    pattern: &Regex,
    start: usize,
    end: usize,
) -> Vec<usize> {
    let end = end.min(lines.len());
    if start >= end {
        return Vec::new();
    }

    lines[start..end]
        .iter()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line.as_ref()))
        .map(|(offset, _)| start + offset)
        .collect()
}

pub fn find_first<S: AsRef<str>>(
    lines: &[S],
    pattern: &Regex,
    start: usize,
    end: usize,
) -> Option<usize> {
    let end = end.min(lines.len());
    if start >= end {
        return None;
    }

    lines[start..end]
        .iter()
        .position(|line| pattern.is_match(line.as_ref()))
        .map(|offset| start + offset)
}

/// First unsigned `digits.digits` token of `line`. Signs and exponents are not part of the token.
pub fn parse_first_decimal(line: &str) -> Option<f64> {
    DECIMAL_TOKEN
        .find(line)
        .and_then(|token| token.as_str().parse::<f64>().ok())
}

pub fn parse_first_decimal_at<S: AsRef<str>>(lines: &[S], line_index: usize) -> SpectrumResult<f64> {
    let line: &str = lines.get(line_index).map_or("", |line| line.as_ref());
    parse_first_decimal(line).ok_or_else(|| SpectrumError::NoNumericToken {
        line_index,
        line: line.to_string(),
    })
}

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$")
        .expect("numeric grammar is a valid regex")
});

/// Parses text as a plain decimal or scientific-notation number.
///
/// Surrounding whitespace is ignored. Hex, `Infinity`, `NaN` and thousands
/// separators are rejected, as are values that overflow to infinity.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

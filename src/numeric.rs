use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    // Optional sign, then digits with an optional decimal part (or a bare
    // leading point), then an optional exponent. Thousands separators and
    // trailing text do not match.
    static ref NUMERIC_REGEX: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

/// Permissively coerces a cell value to a finite floating-point number
///
/// Mirrors the filtering the insight computation applies to the y-series:
/// JSON numbers pass through, strings are trimmed and parsed when they look
/// numeric, and everything that ends up NaN or infinite counts as missing
/// rather than zero.
///
/// # Arguments
/// * `value` - The cell value as stored in a [`Row`](crate::table::Row)
///
/// # Returns
/// * `Some(f64)` for a finite numeric value, `None` otherwise
pub fn coerce(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if !NUMERIC_REGEX.is_match(trimmed) {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    if parsed.is_finite() { Some(parsed) } else { None }
}

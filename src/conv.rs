//! Lenient string-to-scalar conversions.
//!
//! Configuration values arrive as free-form strings; these helpers fall back
//! to a supplied default instead of failing, which is the contract every
//! optional argument in the condition schema relies on.

/// Parse an integer, falling back on malformed input.
#[must_use]
pub fn conv_int(s: &str, default: i64) -> i64 {
    s.trim().parse().unwrap_or(default)
}

/// Parse a float, falling back on malformed input.
#[must_use]
pub fn conv_float(s: &str, default: f64) -> f64 {
    s.trim().parse().unwrap_or(default)
}

/// Parse a boolean: `0`/`no`/`false`/empty are false, `1`/`yes`/`true` are
/// true, anything else falls back.
#[must_use]
pub fn conv_bool(s: &str, default: bool) -> bool {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "no" | "false" => false,
        "1" | "yes" | "true" => true,
        _ => default,
    }
}

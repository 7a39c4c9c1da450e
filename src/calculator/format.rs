//! Conversion of numeric results into display strings.

/// Significant digits used for ordinary fractional results.
const SIGNIFICANT_DIGITS: usize = 8;

/// Magnitude at and above which results switch to scientific notation.
const LARGE_THRESHOLD: f64 = 1e10;

/// Non-zero magnitudes below this also switch to scientific notation.
const SMALL_THRESHOLD: f64 = 1e-7;

/// Format a result for display. Never fails.
///
/// - NaN renders as `Error`
/// - infinities render as `Infinity` / `-Infinity`
/// - integral values below 1e10 render without a decimal point
/// - very large or very small values render as `d.dde±XX`
/// - everything else gets eight significant digits
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "Error".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let magnitude = value.abs();
    if value == (value as i64) as f64 && magnitude < LARGE_THRESHOLD {
        return format!("{}", value as i64);
    }
    if magnitude >= LARGE_THRESHOLD || (magnitude < SMALL_THRESHOLD && value != 0.0) {
        return format_scientific(value, 2);
    }
    format_general(value, SIGNIFICANT_DIGITS)
}

/// `mantissa` with `decimals` fractional digits, then a signed exponent of at
/// least two digits: `1.23e+10`, `-4.00e-08`.
fn format_scientific(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*e}", decimals, value);
    let (mantissa, exponent) = split_exponent(&raw);
    join_exponent(mantissa, exponent)
}

/// Fixed or scientific notation with exactly `digits` significant digits,
/// trailing zeros kept: `0.50000000`, `1.2340000e-05`.
fn format_general(value: f64, digits: usize) -> String {
    let precision = digits.saturating_sub(1);
    let raw = format!("{:.*e}", precision, value);
    let (mantissa, exponent) = split_exponent(&raw);

    if exponent < -4 || exponent >= digits as i32 {
        return join_exponent(mantissa, exponent);
    }

    let decimals = (precision as i32 - exponent).max(0) as usize;
    format!("{:.*}", decimals, value)
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn join_exponent(mantissa: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

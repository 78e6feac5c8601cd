//! Numeric token classification and the serializer's number
//! formatting. The integer/double distinction made here is permanent:
//! nothing downstream narrows an `Int` to a `Double` or back.

use crate::types::value::Node;

/// Convert a numeric token into a node. `is_float` is set by the
/// scanner when the token carried a fractional part or an exponent.
///
/// Both paths must consume the whole token: the scanner hands over
/// loose character runs (digits plus `.eE+-`), so shape errors like
/// `1.2.3` or `1e` are rejected here, as are overflow, underflow and
/// non-finite results. Returns `None` on any of those.
pub(crate) fn classify(text: &str, is_float: bool) -> Option<Node> {
    if is_float {
        parse_double(text).map(Node::Double)
    } else {
        text.parse::<i64>().ok().map(Node::Int)
    }
}

fn parse_double(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    // FromStr maps full underflow to 0.0 silently; a zero result from
    // a nonzero mantissa means the token was out of range.
    if value == 0.0 && mantissa_has_nonzero_digit(text) {
        return None;
    }
    Some(value)
}

fn mantissa_has_nonzero_digit(text: &str) -> bool {
    text.bytes()
        .take_while(|&b| b != b'e' && b != b'E')
        .any(|b| (b'1'..=b'9').contains(&b))
}

pub(crate) fn write_int(out: &mut String, value: i64) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(value));
}

/// Render a double under the fixed threshold contract: integral values
/// below 1e60 with zero decimal places, magnitudes below 1e-6 or at or
/// above 1e9 in `%e`-style scientific notation, everything else with
/// 17 significant digits (`%.17g`-style, trailing zeros trimmed).
pub(crate) fn write_double(out: &mut String, value: f64) {
    if !value.is_finite() {
        out.push_str("null");
        return;
    }

    let magnitude = value.abs();
    if (value.floor() - value).abs() <= f64::EPSILON && magnitude < 1e60 {
        out.push_str(&format!("{value:.0}"));
    } else if magnitude < 1e-6 || magnitude >= 1e9 {
        write_exponential(out, value);
    } else {
        write_significant17(out, value);
    }
}

/// `printf("%e")` shape: six fraction digits, signed exponent padded
/// to two digits.
fn write_exponential(out: &mut String, value: f64) {
    let formatted = format!("{value:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            out.push_str(mantissa);
            push_exponent(out, exponent.parse::<i64>().unwrap_or(0));
        }
        None => out.push_str(&formatted),
    }
}

/// `printf("%.17g")` shape. Like `%g`, the fixed/scientific choice is
/// made on the decimal exponent of the value after rounding to 17
/// significant digits (read off the normalized `{:.16e}` form, not
/// `log10`, which is off by one around exact powers of ten): exponents
/// below -4 render scientific, the rest fixed-point, and trailing
/// fraction zeros are trimmed either way.
fn write_significant17(out: &mut String, value: f64) {
    let formatted = format!("{value:.16e}");
    let Some((mantissa, exp)) = formatted.split_once('e') else {
        out.push_str(&formatted);
        return;
    };
    let exponent: i64 = exp.parse().unwrap_or(0);
    if exponent < -4 {
        out.push_str(trim_fraction(mantissa));
        push_exponent(out, exponent);
    } else {
        let decimals = (16 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        out.push_str(trim_fraction(&fixed));
    }
}

fn push_exponent(out: &mut String, exponent: i64) {
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
        out.push('0');
    }
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(magnitude));
}

fn trim_fraction(formatted: &str) -> &str {
    match formatted.split_once('.') {
        Some((int_part, fraction)) => {
            let trimmed = fraction.trim_end_matches('0');
            if trimmed.is_empty() {
                int_part
            } else {
                // Keep the original slice so no re-allocation is needed.
                &formatted[..int_part.len() + 1 + trimmed.len()]
            }
        }
        None => formatted,
    }
}

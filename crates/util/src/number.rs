//! ECMAScript number rendering.
//!
//! Renders `f64` the way `Number.prototype.toString()` does (ECMA-262,
//! `Number::toString` with radix 10). The digits come from Rust's shortest
//! round-trip formatter, so only the layout rules live here:
//!
//! - integers below 1e21 print without exponent or fraction (`1`, `100`)
//! - magnitudes in `[1e-7, 1e21)` print in plain decimal (`0.000001`, `1.1`)
//! - everything else uses exponent form with an explicit sign (`1e+21`, `1e-7`)
//! - negative zero prints as `0`

use std::fmt::Write;

/// Render a finite number. Returns `None` for `NaN` and the infinities, which
/// have no JSON representation.
///
/// # Examples
///
/// ```
/// use json_canon_util::number::number_to_string;
///
/// assert_eq!(number_to_string(1.0).as_deref(), Some("1"));
/// assert_eq!(number_to_string(1.1).as_deref(), Some("1.1"));
/// assert_eq!(number_to_string(1e21).as_deref(), Some("1e+21"));
/// assert_eq!(number_to_string(f64::NAN), None);
/// ```
pub fn number_to_string(n: f64) -> Option<String> {
    let mut out = String::new();
    write_number(&mut out, n)?;
    Some(out)
}

/// Append the rendering of `n` to `out`. Returns `None` (and writes nothing)
/// when `n` is not finite.
pub fn write_number(out: &mut String, n: f64) -> Option<()> {
    if !n.is_finite() {
        return None;
    }
    if n == 0.0 {
        out.push('0');
        return Some(());
    }
    if n < 0.0 {
        out.push('-');
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e-7".
    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e')?;
    let exp: i32 = exp.parse().ok()?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exp + 1;

    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - k) as usize));
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (first, rest) = digits.split_at(1);
        out.push_str(first);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = point - 1;
        let sign = if e < 0 { '-' } else { '+' };
        write!(out, "e{sign}{}", e.unsigned_abs()).ok()?;
    }
    Some(())
}

//! Number rendering for the comparison report
//!
//! Report lines render floats like `%g` with six significant digits.
//! Historical reports are diffed against new ones, so the rendering must not
//! drift.

use std::fmt;

/// Significant digits of the default float rendering
pub const SIGNIFICANT_DIGITS: usize = 6;

/// Display adapter rendering an `f64` like `printf("%g")`
///
/// ```
/// use mzxml_diff::compare::GFloat;
///
/// assert_eq!(GFloat(445.123456).to_string(), "445.123");
/// assert_eq!(GFloat(1.5e7).to_string(), "1.5e+07");
/// assert_eq!(GFloat(0.00015).to_string(), "0.00015");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GFloat(pub f64);

impl fmt::Display for GFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str(if value.is_sign_negative() { "-nan" } else { "nan" });
        }
        if value.is_infinite() {
            return f.write_str(if value < 0.0 { "-inf" } else { "inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0" } else { "0" });
        }

        // the exponent must be taken after rounding to the target precision
        let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return f.write_str(&scientific);
        };
        let exponent: i32 = match exponent.parse() {
            Ok(exponent) => exponent,
            Err(_) => return f.write_str(&scientific),
        };

        if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                trim_fraction(mantissa),
                sign,
                exponent.unsigned_abs()
            )
        } else {
            let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
            let fixed = format!("{:.*}", decimals, value);
            f.write_str(trim_fraction(&fixed))
        }
    }
}

/// Strip trailing zeros of a fractional part, and the point if nothing is left
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

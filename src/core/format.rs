//! Numeric formatting for the display and history.
//!
//! Results are rounded to a fixed number of significant digits and then
//! re-stringified in the shortest form that round-trips, so `0.1 + 0.2`
//! shows `0.3` and integral values carry no trailing `.0`.

/// Text shown in place of any non-finite value.
pub const ERROR_DISPLAY: &str = "Error";

/// Significant digits kept by default.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 10;

const EXPONENT_UPPER: f64 = 1e21;
const EXPONENT_LOWER: f64 = 1e-6;

/// Parse display text into a number.
///
/// Anything that is not a numeral (the error sentinel included) parses as
/// NaN, so arithmetic on it stays non-finite.
pub fn parse_number(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// Round `value` to `digits` significant decimal digits.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    let precision = digits.max(1) - 1;
    format!("{:.*e}", precision, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// Format a computed value for display.
///
/// # Example
///
/// ```rust
/// use synthcalc::core::format_number;
///
/// assert_eq!(format_number(0.1 + 0.2, 10), "0.3");
/// assert_eq!(format_number(8.0, 10), "8");
/// assert_eq!(format_number(f64::INFINITY, 10), "Error");
/// ```
pub fn format_number(value: f64, significant_digits: usize) -> String {
    let rounded = round_significant(value, significant_digits);
    if !rounded.is_finite() {
        return ERROR_DISPLAY.to_string();
    }
    // Covers -0 as well.
    if rounded == 0.0 {
        return "0".to_string();
    }

    let magnitude = rounded.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        rounded.to_string()
    } else {
        exponent_form(rounded)
    }
}

/// Exponent notation with an explicit exponent sign, e.g. `1.5e+21`.
fn exponent_form(value: f64) -> String {
    let raw = format!("{:e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_point_noise_is_trimmed() {
        assert_eq!(format_number(0.1 + 0.2, 10), "0.3");
        assert_eq!(format_number(1.1 * 3.0, 10), "3.3");
        assert_eq!(format_number(1.0 / 3.0, 10), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0, 10), "0.6666666667");
    }

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(format_number(8.0, 10), "8");
        assert_eq!(format_number(-42.0, 10), "-42");
        assert_eq!(format_number(100.0, 10), "100");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        assert_eq!(format_number(-0.0, 10), "0");
        assert_eq!(format_number(0.0 * -5.0, 10), "0");
    }

    #[test]
    fn non_finite_values_render_as_error() {
        assert_eq!(format_number(f64::INFINITY, 10), ERROR_DISPLAY);
        assert_eq!(format_number(f64::NEG_INFINITY, 10), ERROR_DISPLAY);
        assert_eq!(format_number(f64::NAN, 10), ERROR_DISPLAY);
    }

    #[test]
    fn rounding_to_limit_can_overflow_to_error() {
        assert_eq!(format_number(f64::MAX, 10), ERROR_DISPLAY);
    }

    #[test]
    fn large_and_tiny_values_use_exponent_form() {
        assert_eq!(format_number(1e21, 10), "1e+21");
        assert_eq!(format_number(1.5e22, 10), "1.5e+22");
        assert_eq!(format_number(1e-7, 10), "1e-7");
        assert_eq!(format_number(123456789012.0 * 1e10, 10), "1.23456789e+21");
    }

    #[test]
    fn moderate_values_stay_positional() {
        assert_eq!(format_number(1e20, 10), "100000000000000000000");
        assert_eq!(format_number(0.000001, 10), "0.000001");
    }

    #[test]
    fn significant_digits_are_respected() {
        assert_eq!(format_number(123456789012.0, 10), "123456789000");
        assert_eq!(format_number(3.14159, 3), "3.14");
    }

    #[test]
    fn parse_accepts_partial_entry() {
        assert_eq!(parse_number("0."), 0.0);
        assert_eq!(parse_number("-12.5"), -12.5);
        assert_eq!(parse_number("1e+21"), 1e21);
        assert!(parse_number(ERROR_DISPLAY).is_nan());
    }
}

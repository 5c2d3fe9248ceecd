//! Round-trip-safe number formatting and total number parsing.

/// Format a double as the shortest decimal text that parses back to the
/// exact same value.
///
/// `NaN`, the infinities, and zero have fixed spellings; everything else
/// goes through ryu's shortest-round-trip form, with an integral `.0`
/// suffix stripped.
///
/// # Examples
/// ```
/// assert_eq!(hostjson::num::format(0.25), "0.25");
/// assert_eq!(hostjson::num::format(3.0), "3");
/// assert_eq!(hostjson::num::format(0.0), "0");
/// assert_eq!(hostjson::num::format(f64::NAN), "NaN");
/// assert_eq!(hostjson::num::format(f64::NEG_INFINITY), "-Infinity");
/// ```
pub fn format(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu::Buffer::new();
    let raw = buffer.format_finite(value);
    match raw.strip_suffix(".0") {
        Some(integral) => integral.to_string(),
        None => raw.to_string(),
    }
}

/// Format a double for JSON output, keeping a fractional marker so the
/// value re-decodes as a floating-point kind rather than an integer.
pub fn format_double(value: f64) -> String {
    let text = format(value);
    if value.is_finite() && !text.contains('.') && !text.contains('e') && !text.contains('E') {
        return text + ".0";
    }
    text
}

/// Parse numeric text to a double. Total: malformed input yields `NaN`
/// rather than an error.
///
/// Accepts an optional sign, `Infinity`, hexadecimal `0x`/`0X` literals,
/// and decimal literals with an optional fraction and `e`/`E` exponent.
/// Any other character makes the input invalid.
///
/// # Examples
/// ```
/// assert_eq!(hostjson::num::parse("  -2.5e3 "), -2500.0);
/// assert_eq!(hostjson::num::parse("0x1A"), 26.0);
/// assert_eq!(hostjson::num::parse("-Infinity"), f64::NEG_INFINITY);
/// assert!(hostjson::num::parse("12px").is_nan());
/// ```
pub fn parse(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    let (negative, rest) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if rest == "Infinity" {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    if let Some(digits) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        return match u64::from_str_radix(digits, 16) {
            Ok(magnitude) => {
                let value = magnitude as f64;
                if negative {
                    -value
                } else {
                    value
                }
            }
            Err(_) => f64::NAN,
        };
    }
    if rest.is_empty()
        || !rest
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    rest.parse::<f64>().unwrap_or(f64::NAN)
}

/// Format a `serde_json::Number` for JSON output.
pub fn format_json_number(number: &serde_json::Number) -> String {
    if let Some(value) = number.as_i64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    if let Some(value) = number.as_u64() {
        let mut buffer = itoa::Buffer::new();
        return buffer.format(value).to_string();
    }
    match number.as_f64() {
        Some(value) => format_double(value),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_format_special_values() {
        assert_eq!(format(f64::NAN), "NaN");
        assert_eq!(format(f64::INFINITY), "Infinity");
        assert_eq!(format(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format(0.0), "0");
        assert_eq!(format(-0.0), "0");
    }

    #[rstest::rstest]
    fn test_format_strips_integral_suffix() {
        assert_eq!(format(1.0), "1");
        assert_eq!(format(-42.0), "-42");
        assert_eq!(format(123456789.0), "123456789");
    }

    #[rstest::rstest]
    fn test_format_keeps_fractions_and_exponents() {
        assert_eq!(format(1.5), "1.5");
        assert_eq!(format(-0.001), "-0.001");
        assert_eq!(format(1e300), "1e300");
    }

    #[rstest::rstest]
    fn test_format_double_restores_marker() {
        assert_eq!(format_double(1.0), "1.0");
        assert_eq!(format_double(0.0), "0.0");
        assert_eq!(format_double(1.5), "1.5");
        assert_eq!(format_double(1e300), "1e300");
        assert_eq!(format_double(f64::NAN), "NaN");
    }

    #[rstest::rstest]
    fn test_parse_decimal_forms() {
        assert_eq!(parse("42"), 42.0);
        assert_eq!(parse("+42"), 42.0);
        assert_eq!(parse("-2.5"), -2.5);
        assert_eq!(parse(".5"), 0.5);
        assert_eq!(parse("1e3"), 1000.0);
        assert_eq!(parse(" 7 "), 7.0);
    }

    #[rstest::rstest]
    fn test_parse_hex_and_infinity() {
        assert_eq!(parse("0x10"), 16.0);
        assert_eq!(parse("0XFF"), 255.0);
        assert_eq!(parse("-0x10"), -16.0);
        assert_eq!(parse("Infinity"), f64::INFINITY);
        assert_eq!(parse("-Infinity"), f64::NEG_INFINITY);
    }

    #[rstest::rstest]
    fn test_parse_is_total() {
        assert!(parse("").is_nan());
        assert!(parse("-").is_nan());
        assert!(parse("12px").is_nan());
        assert!(parse("0xZZ").is_nan());
        assert!(parse("1e").is_nan());
        assert!(parse("nan").is_nan());
    }

    #[rstest::rstest]
    fn test_round_trip_is_exact() {
        let samples = [
            0.1,
            -0.1,
            1.0 / 3.0,
            std::f64::consts::PI,
            1e300,
            -2.5e-10,
            f64::MIN_POSITIVE,
            f64::MAX,
            9007199254740993.0,
        ];
        for value in samples {
            assert_eq!(parse(&format(value)), value);
            assert_eq!(parse(&format_double(value)), value);
        }
    }

    #[rstest::rstest]
    fn test_format_json_number() {
        assert_eq!(format_json_number(&serde_json::Number::from(-7i64)), "-7");
        assert_eq!(
            format_json_number(&serde_json::Number::from(u64::MAX)),
            "18446744073709551615"
        );
        let fractional = serde_json::Number::from_f64(2.5).unwrap();
        assert_eq!(format_json_number(&fractional), "2.5");
        let integral = serde_json::Number::from_f64(3.0).unwrap();
        assert_eq!(format_json_number(&integral), "3.0");
    }
}

use crate::error::{DiffcountError, Result};

/// Splits a literal into its digits and radix the way C's
/// `strtoull(s, NULL, 0)` picks the base.
fn split_radix(s: &str) -> (&str, u32) {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (hex, 16)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    }
}

fn parse_radix(literal: &str) -> Option<u64> {
    let s = literal.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let (digits, radix) = split_radix(s);
    // from_str_radix would accept a second sign
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Parses an offset or length: decimal, `0x` hex or `0`-prefixed octal.
pub fn parse_u64_literal(what: &'static str, literal: &str) -> Result<u64> {
    parse_radix(literal).ok_or_else(|| DiffcountError::InvalidNumber {
        what,
        literal: literal.to_string(),
    })
}

/// Parses the constant operand, which must fit in a single byte.
pub fn parse_constant_byte(literal: &str) -> Result<u8> {
    let invalid = |reason: &str| DiffcountError::InvalidConstantLiteral {
        literal: literal.to_string(),
        reason: reason.to_string(),
    };
    let value = parse_radix(literal).ok_or_else(|| invalid("not an integer"))?;
    u8::try_from(value).map_err(|_| invalid("out of range 0..=255"))
}

/// Renders `value` like C's `printf("%.*g", precision, value)`.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let p = precision.max(1);
    // Round to p significant digits first; the exponent may move (9.99 -> 10.0).
    let sci = format!("{:.*e}", p - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (p as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bases() {
        assert_eq!(parse_u64_literal("seek", "1234").unwrap(), 1234);
        assert_eq!(parse_u64_literal("seek", "0x1f").unwrap(), 31);
        assert_eq!(parse_u64_literal("seek", "0XFF").unwrap(), 255);
        assert_eq!(parse_u64_literal("seek", "010").unwrap(), 8);
        assert_eq!(parse_u64_literal("seek", "0").unwrap(), 0);
        assert_eq!(parse_u64_literal("seek", " +42 ").unwrap(), 42);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "abc", "0x", "09", "-1", "12k", "0x+1", "18446744073709551616"] {
            assert!(
                matches!(
                    parse_u64_literal("length", bad),
                    Err(DiffcountError::InvalidNumber { what: "length", .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_constant_byte() {
        assert_eq!(parse_constant_byte("0xff").unwrap(), 0xff);
        assert_eq!(parse_constant_byte("0377").unwrap(), 0xff);
        assert_eq!(parse_constant_byte("7").unwrap(), 7);
        assert!(matches!(
            parse_constant_byte("256"),
            Err(DiffcountError::InvalidConstantLiteral { .. })
        ));
        assert!(matches!(
            parse_constant_byte("0xzz"),
            Err(DiffcountError::InvalidConstantLiteral { .. })
        ));
    }

    #[test]
    fn test_format_g() {
        assert_eq!(format_g(1.0, 11), "1");
        assert_eq!(format_g(0.0, 11), "0");
        assert_eq!(format_g(0.5, 11), "0.5");
        assert_eq!(format_g(0.25, 11), "0.25");
        assert_eq!(format_g(2.0 / 3.0, 11), "0.66666666667");
        assert_eq!(format_g(0.0001, 11), "0.0001");
        assert_eq!(format_g(0.00001, 11), "1e-05");
        assert_eq!(format_g(1.5e-7, 11), "1.5e-07");
        assert_eq!(format_g(123456.0, 3), "1.23e+05");
        assert_eq!(format_g(f64::NAN, 11), "nan");
    }
}

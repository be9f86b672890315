//! Number formatting for displayed and recorded values.
//!
//! Integral values are rendered without a decimal point. Everything else is
//! rounded half-up to at most ten fractional digits with trailing zeros
//! trimmed.

/// Maximum number of fractional digits kept in a rendered value.
pub const MAX_FRACTION_DIGITS: usize = 10;

/// Format a value for the display, the pending label and history entries.
pub fn format_number(value: f64) -> String {
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
        // Covers -0.0 as well.
        return "0".to_string();
    }

    // `Display` for f64 never uses exponent notation and prints the shortest
    // text that round-trips, without a trailing ".0" for integral values.
    let text = value.to_string();
    if value.fract() == 0.0 {
        return text;
    }
    round_half_up(&text, MAX_FRACTION_DIGITS)
}

/// Round a plain decimal string (optional sign, digits, optional fraction)
/// half-up to `digits` fractional digits and trim trailing zeros.
fn round_half_up(text: &str, digits: usize) -> String {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let Some((int_part, frac_part)) = unsigned.split_once('.') else {
        return text.to_string();
    };

    let round_up = frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|&b| b >= b'5');

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .map(|b| b - b'0')
        .collect();
    let frac_len = frac_part.len().min(digits);

    if round_up {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - frac_len;
    let to_char = |d: &u8| char::from(b'0' + *d);
    let int_digits: String = kept[..split].iter().map(to_char).collect();
    let frac_digits: String = kept[split..].iter().map(to_char).collect();
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::new();
    if negative && (int_digits.bytes().any(|b| b != b'0') || !frac_digits.is_empty()) {
        out.push('-');
    }
    out.push_str(if int_digits.is_empty() { "0" } else { &int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

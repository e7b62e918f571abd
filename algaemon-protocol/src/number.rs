//! Lenient number parsing for command arguments.

/// Parse the leading decimal number of `text`, best effort
///
/// Leading whitespace is skipped and parsing stops at the first character
/// that cannot extend the number, so `"25.5c"` yields `25.5`. Text with no
/// numeric prefix yields `0.0`; callers validate the value range instead
/// of distinguishing a parse failure from a real zero.
pub fn parse_lenient_f32(text: &str) -> f32 {
    let text = text.trim_start();
    let end = numeric_prefix_len(text.as_bytes());
    text[..end].parse().unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` prefix
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    i += count_digits(&bytes[i..]);
    let mut mantissa_digits = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac = count_digits(&bytes[i + 1..]);
        mantissa_digits += frac;
        i += 1 + frac;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    // Exponent only counts when it carries digits
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp = count_digits(&bytes[j.min(bytes.len())..]);
        if exp > 0 {
            i = j + exp;
        }
    }

    i
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_lenient_f32("25.5"), 25.5);
        assert_eq!(parse_lenient_f32("-12"), -12.0);
        assert_eq!(parse_lenient_f32("+7.25"), 7.25);
        assert_eq!(parse_lenient_f32(".5"), 0.5);
        assert_eq!(parse_lenient_f32("5."), 5.0);
    }

    #[test]
    fn test_leading_whitespace_skipped() {
        assert_eq!(parse_lenient_f32("   22.0"), 22.0);
    }

    #[test]
    fn test_trailing_garbage_ignored() {
        assert_eq!(parse_lenient_f32("25.5c"), 25.5);
        assert_eq!(parse_lenient_f32("30 degrees"), 30.0);
        assert_eq!(parse_lenient_f32("1.2.3"), 1.2);
    }

    #[test]
    fn test_no_number_is_zero() {
        assert_eq!(parse_lenient_f32(""), 0.0);
        assert_eq!(parse_lenient_f32("abc"), 0.0);
        assert_eq!(parse_lenient_f32("-"), 0.0);
        assert_eq!(parse_lenient_f32("."), 0.0);
        assert_eq!(parse_lenient_f32("-.x"), 0.0);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_lenient_f32("1e2"), 100.0);
        assert_eq!(parse_lenient_f32("2.5E-1"), 0.25);
        // Dangling exponent marker is not part of the number
        assert_eq!(parse_lenient_f32("3e"), 3.0);
        assert_eq!(parse_lenient_f32("3e+"), 3.0);
    }
}

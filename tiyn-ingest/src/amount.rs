//! Best-effort extraction of a signed decimal from a noisy token.
//!
//! Statement exports and OCRed PDFs write amounts like `"-1 234,56"`,
//! `"+500"` or `"12.00 ₸"`. This is recovery from export noise, not
//! validation: anything that survives the cleanup and parses as a finite
//! number is accepted.

use tiyn_core::AnalyzeError;

/// Currency markers stripped from the end of a token before parsing:
/// the tenge sign, its ISO code, transliterated abbreviations, and the
/// dollar/ruble signs that show up in multi-currency statements.
const CURRENCY_MARKERS: &[&str] = &["₸", "KZT", "тг", "т", "$", "₽"];

/// Parse a candidate amount token into a signed number.
///
/// Cleanup order: trim, strip trailing currency markers, drop internal
/// whitespace (thousands separators), comma decimal separator to period,
/// then drop every character that is not a digit, sign, or period. The
/// residue must parse as a finite `f64`; empty residue, repeated signs, or
/// repeated periods fail.
pub fn parse_amount(token: &str) -> Result<f64, AnalyzeError> {
    let mut s = token.trim();
    loop {
        let stripped = CURRENCY_MARKERS
            .iter()
            .find_map(|marker| s.strip_suffix(marker));
        match stripped {
            Some(rest) => s = rest.trim_end(),
            None => break,
        }
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '+' || *c == '.')
        .collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AnalyzeError::AmountParse {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_and_comma_decimal() {
        assert_eq!(parse_amount("1 234,56 ₸").unwrap(), 1234.56);
    }

    #[test]
    fn test_negative_integer() {
        assert_eq!(parse_amount("-500").unwrap(), -500.0);
    }

    #[test]
    fn test_explicit_plus_sign() {
        assert_eq!(parse_amount("+500").unwrap(), 500.0);
    }

    #[test]
    fn test_currency_markers() {
        assert_eq!(parse_amount("12.00 ₸").unwrap(), 12.0);
        assert_eq!(parse_amount("700 KZT").unwrap(), 700.0);
        assert_eq!(parse_amount("850 тг").unwrap(), 850.0);
        assert_eq!(parse_amount("19.99$").unwrap(), 19.99);
        assert_eq!(parse_amount("42 ₽").unwrap(), 42.0);
    }

    #[test]
    fn test_empty_token_fails() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("₸").is_err());
    }

    #[test]
    fn test_garbage_fails() {
        assert!(parse_amount("--5").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_stray_letters_are_stripped() {
        // Permissive by design: OCR noise inside the token is dropped.
        assert_eq!(parse_amount("1a2b3").unwrap(), 123.0);
    }

    #[test]
    fn test_idempotent_through_stringify() {
        let first = parse_amount("1 234,56").unwrap();
        let again = parse_amount(&first.to_string()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_error_carries_original_token() {
        let err = parse_amount("??").unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::AmountParse {
                token: "??".to_string()
            }
        );
    }
}

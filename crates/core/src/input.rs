//! Lenient numeric parsing for form fields.
//!
//! The calculator always shows a number: text that does not start with a
//! number counts as zero, and trailing junk after a leading number is
//! ignored (`"12kg"` is 12). Nothing here returns an error.
//!
//! The same goes for the arithmetic: figures too large for a [`Decimal`]
//! stick at [`Decimal::MAX`] or [`Decimal::MIN`] rather than overflowing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Parse a money or quantity field, coercing anything unparseable to zero.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let prefix = numeric_prefix(raw.trim());
    prefix.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Parse a whole-number field such as a bird count.
///
/// Fractions are truncated; negative or unparseable input is zero and
/// counts past `u64::MAX` are capped there.
#[must_use]
pub fn parse_count(raw: &str) -> u64 {
    let amount = parse_amount(raw);
    if amount.is_sign_negative() {
        return 0;
    }
    amount.trunc().to_u64().unwrap_or(u64::MAX)
}

/// Sum of `values`, saturating at the `Decimal` bounds.
#[must_use]
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `numerator / denominator`, saturating at the `Decimal` bounds.
///
/// Dividing by zero gives zero.
#[must_use]
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Longest leading `[+-]?digits[.digits]` slice of `s`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if has_digits { s.get(..end).unwrap_or("") } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("1000"), Decimal::from(1000));
        assert_eq!(parse_amount(" 2.75 "), Decimal::new(275, 2));
        assert_eq!(parse_amount(".5"), Decimal::new(5, 1));
        assert_eq!(parse_amount("-3"), Decimal::from(-3));
    }

    #[test]
    fn test_parse_amount_coerces_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
        assert_eq!(parse_amount("."), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_ignores_trailing_text() {
        assert_eq!(parse_amount("12kg"), Decimal::from(12));
        assert_eq!(parse_amount("1,500"), Decimal::from(1));
        assert_eq!(parse_amount("3.5.1"), Decimal::new(35, 1));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1000"), 1000);
        assert_eq!(parse_count("99.9"), 99);
        assert_eq!(parse_count("-10"), 0);
        assert_eq!(parse_count("many"), 0);
        assert_eq!(parse_count("18446744073709551616"), u64::MAX);
    }

    #[test]
    fn test_saturating_sum() {
        let values = [Decimal::from(2), Decimal::new(5, 1)];
        assert_eq!(saturating_sum(values), Decimal::new(25, 1));
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, Decimal::NEGATIVE_ONE]), Decimal::MIN);
        assert_eq!(saturating_sum(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_saturating_div() {
        assert_eq!(saturating_div(Decimal::from(9), Decimal::from(3)), Decimal::from(3));
        assert_eq!(saturating_div(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
        let tiny = Decimal::new(1, 20);
        assert_eq!(saturating_div(Decimal::MAX, tiny), Decimal::MAX);
        assert_eq!(saturating_div(Decimal::MAX, -tiny), Decimal::MIN);
    }
}

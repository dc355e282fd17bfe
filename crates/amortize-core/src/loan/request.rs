//! Raw, unvalidated loan requests.
//!
//! Requests arrive from a presentation layer as whatever the user typed, so
//! every field is a number, free text, or some other JSON value (including a
//! missing field) that can never be numeric. Deciding whether text is
//! numeric is part of validation, not deserialization.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest power-of-ten exponent accepted in scientific notation.
const MAX_EXPONENT: u32 = 64;

/// One raw scalar input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoanValue {
    Number(Decimal),
    Text(String),
    /// `null`, booleans, arrays, objects, or an absent field.
    Other(Value),
}

impl Default for LoanValue {
    fn default() -> Self {
        LoanValue::Other(Value::Null)
    }
}

impl LoanValue {
    /// The numeric value, if this input is numeric.
    ///
    /// Text is numeric when, after trimming whitespace, it is an optionally
    /// signed decimal literal with an optional exponent (`"5"`, `"-1"`,
    /// `".5"`, `"1e3"`). Literals too large for a `Decimal` are not numeric.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            LoanValue::Number(d) => Some(*d),
            LoanValue::Text(s) => parse_numeric(s),
            LoanValue::Other(_) => None,
        }
    }
}

impl From<Decimal> for LoanValue {
    fn from(d: Decimal) -> Self {
        LoanValue::Number(d)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LoanValue {
                fn from(n: $t) -> Self {
                    LoanValue::Number(Decimal::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl From<&str> for LoanValue {
    fn from(s: &str) -> Self {
        LoanValue::Text(s.to_string())
    }
}

impl From<String> for LoanValue {
    fn from(s: String) -> Self {
        LoanValue::Text(s)
    }
}

impl fmt::Display for LoanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanValue::Number(d) => write!(f, "{d}"),
            LoanValue::Text(s) => write!(f, "{s:?}"),
            LoanValue::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Loan request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Principal borrowed.
    #[serde(default)]
    pub loan_amount: LoanValue,
    /// Annual interest rate in percent (5 = 5%).
    #[serde(default, alias = "rate")]
    pub annual_rate_percent: LoanValue,
    /// Loan term in years.
    #[serde(default, alias = "years")]
    pub term_years: LoanValue,
}

impl LoanRequest {
    pub fn new(
        loan_amount: impl Into<LoanValue>,
        annual_rate_percent: impl Into<LoanValue>,
        term_years: impl Into<LoanValue>,
    ) -> Self {
        LoanRequest {
            loan_amount: loan_amount.into(),
            annual_rate_percent: annual_rate_percent.into(),
            term_years: term_years.into(),
        }
    }
}

/// Split of a numeric literal into its parts, borrowed from the input.
struct Literal<'a> {
    negative: bool,
    int_digits: &'a str,
    frac_digits: &'a str,
    exponent: Option<(bool, &'a str)>,
}

fn split_literal(s: &str) -> Option<Literal<'_>> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let int_digits = &rest[..int_len];
    let mut rest = &rest[int_len..];

    let mut frac_digits = "";
    if let Some(after_point) = rest.strip_prefix('.') {
        let frac_len = after_point.bytes().take_while(u8::is_ascii_digit).count();
        frac_digits = &after_point[..frac_len];
        rest = &after_point[frac_len..];
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let exponent = match rest.strip_prefix(['e', 'E']) {
        None if rest.is_empty() => None,
        None => return None,
        Some(exp) => {
            let (exp_negative, digits) = match exp.as_bytes().first() {
                Some(b'-') => (true, &exp[1..]),
                Some(b'+') => (false, &exp[1..]),
                _ => (false, exp),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some((exp_negative, digits))
        }
    };

    Some(Literal {
        negative,
        int_digits,
        frac_digits,
        exponent,
    })
}

pub(crate) fn parse_numeric(text: &str) -> Option<Decimal> {
    let literal = split_literal(text.trim())?;

    let int_part = if literal.int_digits.is_empty() {
        "0"
    } else {
        literal.int_digits
    };
    let canonical = if literal.frac_digits.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{}", literal.frac_digits)
    };
    let mut value = Decimal::from_str(&canonical).ok()?;

    if let Some((exp_negative, digits)) = literal.exponent {
        let exp: u32 = digits.parse().ok().filter(|e| *e <= MAX_EXPONENT)?;
        for _ in 0..exp {
            value = if exp_negative {
                value.checked_div(Decimal::TEN)?
            } else {
                value.checked_mul(Decimal::TEN)?
            };
        }
    }

    Some(if literal.negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_integers_and_decimals() {
        assert_eq!(parse_numeric("500000"), Some(dec!(500000)));
        assert_eq!(parse_numeric("5.25"), Some(dec!(5.25)));
        assert_eq!(parse_numeric("-1"), Some(dec!(-1)));
        assert_eq!(parse_numeric("+3"), Some(dec!(3)));
    }

    #[test]
    fn test_leading_and_trailing_points() {
        assert_eq!(parse_numeric(".5"), Some(dec!(0.5)));
        assert_eq!(parse_numeric("5."), Some(dec!(5)));
        assert_eq!(parse_numeric("."), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(parse_numeric("  30 "), Some(dec!(30)));
        assert_eq!(parse_numeric("\t5\n"), Some(dec!(5)));
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(parse_numeric("1e3"), Some(dec!(1000)));
        assert_eq!(parse_numeric("2.5E+2"), Some(dec!(250)));
        assert_eq!(parse_numeric("5e-1"), Some(dec!(0.5)));
        assert_eq!(parse_numeric("1e"), None);
        assert_eq!(parse_numeric("1e400"), None);
    }

    #[test]
    fn test_non_numeric_text() {
        for text in ["", "   ", "abc", "12abc", "1,000", "0x1A", "--5", "5 5"] {
            assert_eq!(parse_numeric(text), None, "{text:?} should not be numeric");
        }
    }

    #[test]
    fn test_number_variant_is_always_numeric() {
        assert_eq!(LoanValue::from(dec!(-2)).as_decimal(), Some(dec!(-2)));
    }

    #[test]
    fn test_request_deserializes_numbers_and_text() {
        let req: LoanRequest = serde_json::from_str(
            r#"{"loan_amount": 500000, "annual_rate_percent": "abc", "term_years": " 30 "}"#,
        )
        .unwrap();
        assert_eq!(req.loan_amount.as_decimal(), Some(dec!(500000)));
        assert_eq!(req.annual_rate_percent.as_decimal(), None);
        assert_eq!(req.term_years.as_decimal(), Some(dec!(30)));
    }

    #[test]
    fn test_request_accepts_short_field_names() {
        let req: LoanRequest =
            serde_json::from_str(r#"{"loan_amount": 1, "rate": 2, "years": 3}"#).unwrap();
        assert_eq!(req, LoanRequest::new(1, 2, 3));
    }

    #[test]
    fn test_non_scalar_json_values_are_not_numeric() {
        let req: LoanRequest = serde_json::from_str(
            r#"{"loan_amount": null, "rate": false, "years": {"n": 30}}"#,
        )
        .unwrap();
        assert_eq!(req.loan_amount, LoanValue::Other(Value::Null));
        assert_eq!(req.annual_rate_percent, LoanValue::Other(Value::Bool(false)));
        assert_eq!(req.term_years.as_decimal(), None);
        assert_eq!(req.annual_rate_percent.to_string(), "false");
    }

    #[test]
    fn test_missing_fields_default_to_not_numeric() {
        let req: LoanRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.loan_amount.as_decimal(), None);
        assert_eq!(req.annual_rate_percent, LoanValue::default());
        assert_eq!(req.term_years, LoanValue::Other(Value::Null));
    }
}

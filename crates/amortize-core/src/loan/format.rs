//! Display formatting for summaries and schedule rows.
//!
//! Grouping and decimal symbols are explicit configuration, never taken from
//! the process locale.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::loan::payment::PaymentPlan;
use crate::loan::schedule::AmortizationRow;
use crate::types::Money;
use crate::AmortizationResult;

/// Most fractional digits a `Decimal` can carry.
const MAX_DECIMALS: u32 = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimals: u32,
    pub decimal_point: char,
    /// `None` disables digit grouping.
    pub thousands_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimals: 2,
            decimal_point: '.',
            thousands_separator: Some(','),
        }
    }
}

impl NumberFormat {
    pub fn validate(&self) -> AmortizationResult<()> {
        if self.decimals > MAX_DECIMALS {
            return Err(AmortizationError::InvalidInput {
                field: "decimals".into(),
                reason: format!("At most {MAX_DECIMALS} decimal places are supported"),
            });
        }
        if self.thousands_separator == Some(self.decimal_point) {
            return Err(AmortizationError::InvalidInput {
                field: "thousands_separator".into(),
                reason: "Thousands separator must differ from the decimal point".into(),
            });
        }
        if self.decimal_point.is_ascii_digit()
            || self.thousands_separator.is_some_and(|c| c.is_ascii_digit())
        {
            return Err(AmortizationError::InvalidInput {
                field: "decimal_point".into(),
                reason: "Separators cannot be digits".into(),
            });
        }
        Ok(())
    }

    /// Round half away from zero and render, e.g. `500000` → `"500,000.00"`.
    ///
    /// Values that round to zero never carry a minus sign.
    pub fn format(&self, value: Decimal) -> String {
        let mut rounded = value
            .round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        rounded.rescale(self.decimals);
        let negative = value.is_sign_negative() && !rounded.is_zero();

        let digits = rounded.to_string();
        let (int_digits, frac_digits) = match digits.split_once('.') {
            Some((int_digits, frac_digits)) => (int_digits, frac_digits),
            None => (digits.as_str(), ""),
        };

        let mut out = String::with_capacity(digits.len() + int_digits.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        match self.thousands_separator {
            Some(sep) => {
                for (i, ch) in int_digits.chars().enumerate() {
                    if i > 0 && (int_digits.len() - i) % 3 == 0 {
                        out.push(sep);
                    }
                    out.push(ch);
                }
            }
            None => out.push_str(int_digits),
        }
        if !frac_digits.is_empty() {
            out.push(self.decimal_point);
            out.push_str(frac_digits);
        }
        out
    }
}

/// Headline figures, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub home_value: String,
    pub monthly_mortgage: String,
    pub total_payment: String,
    pub total_interest: String,
}

impl Summary {
    pub fn build(loan_amount: Money, plan: &PaymentPlan, fmt: &NumberFormat) -> Self {
        Summary {
            home_value: fmt.format(loan_amount),
            monthly_mortgage: fmt.format(plan.monthly_payment),
            total_payment: fmt.format(plan.total_payments),
            total_interest: fmt.format(plan.total_interest),
        }
    }
}

/// A schedule row with its money columns formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    pub month_number: u32,
    pub payment: String,
    pub principal: String,
    pub interest: String,
    pub balance: String,
}

impl FormattedRow {
    pub fn from_row(row: &AmortizationRow, fmt: &NumberFormat) -> Self {
        FormattedRow {
            month_number: row.month_number,
            payment: fmt.format(row.payment),
            principal: fmt.format(row.principal),
            interest: fmt.format(row.interest),
            balance: fmt.format(row.balance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_grouping() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(dec!(500000)), "500,000.00");
        assert_eq!(fmt.format(dec!(966278.9214)), "966,278.92");
        assert_eq!(fmt.format(dec!(1234567890.5)), "1,234,567,890.50");
        assert_eq!(fmt.format(dec!(999.999)), "1,000.00");
        assert_eq!(fmt.format(dec!(12)), "12.00");
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(dec!(0.125)), "0.13");
        assert_eq!(fmt.format(dec!(2.675)), "2.68");
        assert_eq!(fmt.format(dec!(-0.125)), "-0.13");
    }

    #[test]
    fn test_no_negative_zero() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(dec!(-0.0000000001)), "0.00");
        assert_eq!(fmt.format(dec!(-0.004)), "0.00");
        assert_eq!(fmt.format(dec!(-1234.5)), "-1,234.50");
    }

    #[test]
    fn test_european_style() {
        let fmt = NumberFormat {
            decimals: 2,
            decimal_point: ',',
            thousands_separator: Some('.'),
        };
        assert_eq!(fmt.format(dec!(2684.108115)), "2.684,11");
    }

    #[test]
    fn test_no_grouping_and_zero_decimals() {
        let fmt = NumberFormat {
            decimals: 0,
            decimal_point: '.',
            thousands_separator: None,
        };
        assert_eq!(fmt.format(dec!(466278.92)), "466279");
    }

    #[test]
    fn test_invalid_formats_rejected() {
        let clash = NumberFormat {
            thousands_separator: Some('.'),
            ..NumberFormat::default()
        };
        assert!(clash.validate().is_err());

        let digit = NumberFormat {
            decimal_point: '0',
            ..NumberFormat::default()
        };
        assert!(digit.validate().is_err());

        let too_precise = NumberFormat {
            decimals: 29,
            ..NumberFormat::default()
        };
        assert!(too_precise.validate().is_err());
        assert!(NumberFormat::default().validate().is_ok());
    }

    #[test]
    fn test_summary_and_row_formatting() {
        let fmt = NumberFormat::default();
        let plan = PaymentPlan {
            monthly_payment: dec!(2684.108115),
            total_payments: dec!(966278.921421),
            total_interest: dec!(466278.921421),
        };
        let summary = Summary::build(dec!(500000), &plan, &fmt);
        assert_eq!(summary.home_value, "500,000.00");
        assert_eq!(summary.monthly_mortgage, "2,684.11");
        assert_eq!(summary.total_payment, "966,278.92");
        assert_eq!(summary.total_interest, "466,278.92");

        let row = AmortizationRow {
            month_number: 360,
            payment: dec!(2684.108115),
            principal: dec!(2672.97),
            interest: dec!(11.137378),
            balance: dec!(-0.0000000000000001),
        };
        let formatted = FormattedRow::from_row(&row, &fmt);
        assert_eq!(formatted.month_number, 360);
        assert_eq!(formatted.interest, "11.14");
        assert_eq!(formatted.balance, "0.00");
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let fmt: NumberFormat = serde_json::from_str(r#"{"thousands_separator": null}"#).unwrap();
        assert_eq!(fmt.thousands_separator, None);
        assert_eq!(fmt.decimals, 2);
        assert_eq!(fmt.decimal_point, '.');
    }
}

//! Conversion of annual percentage / years into monthly rate / month count.

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::loan::validation::ValidatedLoan;
use crate::types::Rate;
use crate::AmortizationResult;

const PERCENT: Decimal = dec!(100);
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedTerms {
    /// Periodic (monthly) rate as a decimal.
    pub monthly_rate: Rate,
    pub total_months: u32,
}

/// Annual percentage rate → monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Term in years → whole number of months.
pub fn total_months(term_years: Decimal) -> AmortizationResult<u32> {
    let months = term_years * MONTHS_PER_YEAR;
    if !months.fract().is_zero() {
        return Err(AmortizationError::InvalidInput {
            field: "term_years".into(),
            reason: format!("{term_years} years is not a whole number of months"),
        });
    }
    months
        .to_u32()
        .filter(|m| *m > 0)
        .ok_or_else(|| AmortizationError::InvalidInput {
            field: "term_years".into(),
            reason: format!("{term_years} years does not give a schedulable month count"),
        })
}

pub fn normalize(loan: &ValidatedLoan) -> AmortizationResult<NormalizedTerms> {
    let terms = NormalizedTerms {
        monthly_rate: monthly_rate(loan.annual_rate_percent),
        total_months: total_months(loan.term_years)?,
    };
    debug!(
        "normalized terms: monthly_rate={} total_months={}",
        terms.monthly_rate, terms.total_months
    );
    Ok(terms)
}

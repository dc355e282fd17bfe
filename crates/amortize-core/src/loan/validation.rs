//! Field-level validation of raw loan requests.
//!
//! Every rule is checked independently and every failure is collected, so a
//! caller can report all problems with a request in one pass.

use std::fmt;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::loan::request::{LoanRequest, LoanValue};
use crate::loan::terms::{monthly_rate, MONTHS_PER_YEAR};
use crate::AmortizationResult;

/// Longest term that will be scheduled (12,000 monthly rows).
pub const MAX_TERM_YEARS: u32 = 1000;

/// Request field a validation issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    LoanAmount,
    LoanRate,
    NumberOfYears,
}

impl LoanField {
    pub fn label(self) -> &'static str {
        match self {
            LoanField::LoanAmount => "loan amount",
            LoanField::LoanRate => "loan rate",
            LoanField::NumberOfYears => "number of years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NotNumeric,
    NotPositive,
    /// Term does not convert to a whole number of months.
    FractionalMonths,
    /// Term longer than [`MAX_TERM_YEARS`].
    TooLarge,
}

/// A single failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: LoanField,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field.label();
        match self.kind {
            IssueKind::NotNumeric => write!(f, "enter a numeric value for {field}"),
            IssueKind::NotPositive => write!(f, "enter a value greater than zero for {field}"),
            IssueKind::FractionalMonths => {
                write!(f, "enter a {field} that is a whole number of months")
            }
            IssueKind::TooLarge => {
                write!(f, "enter a value no greater than {MAX_TERM_YEARS} for {field}")
            }
        }
    }
}

/// Outcome of validating a [`LoanRequest`]: zero or more issues, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Human-readable messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, field: LoanField, kind: IssueKind) {
        self.issues.push(ValidationIssue { field, kind });
    }

    /// Convert a passing result into the numeric loan it vouches for.
    pub fn into_validated(self, request: &LoanRequest) -> AmortizationResult<ValidatedLoan> {
        if !self.is_valid() {
            return Err(AmortizationError::Validation(self.issues));
        }
        match (
            request.loan_amount.as_decimal(),
            request.annual_rate_percent.as_decimal(),
            request.term_years.as_decimal(),
        ) {
            (Some(loan_amount), Some(annual_rate_percent), Some(term_years)) => Ok(ValidatedLoan {
                loan_amount,
                annual_rate_percent,
                term_years,
            }),
            _ => Err(AmortizationError::InvalidInput {
                field: "request".into(),
                reason: "Validation result does not belong to this request".into(),
            }),
        }
    }
}

/// A loan whose fields passed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedLoan {
    pub loan_amount: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_years: Decimal,
}

/// Check every field of `request`.
///
/// Messages come out in the order loan amount, loan rate, number of years,
/// and within a field numeric before positive. A non-numeric field only
/// reports that it is non-numeric.
pub fn validate(request: &LoanRequest) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_positive(&mut result, LoanField::LoanAmount, &request.loan_amount);

    let rate = check_positive(&mut result, LoanField::LoanRate, &request.annual_rate_percent);
    if let Some(rate) = rate {
        check_rate_accrues(&mut result, rate);
    }

    let years = check_positive(&mut result, LoanField::NumberOfYears, &request.term_years);
    if let Some(years) = years {
        check_whole_months(&mut result, years);
    }

    if !result.is_valid() {
        debug!("loan request rejected: {:?}", result.issues);
    }
    result
}

/// Returns the value when it is numeric and strictly positive.
fn check_positive(
    result: &mut ValidationResult,
    field: LoanField,
    value: &LoanValue,
) -> Option<Decimal> {
    let Some(number) = value.as_decimal() else {
        result.push(field, IssueKind::NotNumeric);
        return None;
    };
    if number <= Decimal::ZERO {
        result.push(field, IssueKind::NotPositive);
        return None;
    }
    Some(number)
}

/// A rate so small that `1 + monthly rate` rounds to exactly one accrues no
/// interest at decimal precision and cannot be priced; report it as zero.
fn check_rate_accrues(result: &mut ValidationResult, annual_rate_percent: Decimal) {
    if Decimal::ONE + monthly_rate(annual_rate_percent) == Decimal::ONE {
        result.push(LoanField::LoanRate, IssueKind::NotPositive);
    }
}

fn check_whole_months(result: &mut ValidationResult, years: Decimal) {
    if years > Decimal::from(MAX_TERM_YEARS) {
        result.push(LoanField::NumberOfYears, IssueKind::TooLarge);
        return;
    }
    let months = years * MONTHS_PER_YEAR;
    if !months.fract().is_zero() {
        result.push(LoanField::NumberOfYears, IssueKind::FractionalMonths);
    }
}

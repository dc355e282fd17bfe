//! End-to-end loan calculation: validate, price, schedule, format.

use std::time::Instant;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::loan::format::{FormattedRow, NumberFormat, Summary};
use crate::loan::payment::{monthly_payment, payment_plan};
use crate::loan::request::LoanRequest;
use crate::loan::schedule::generate_schedule;
use crate::loan::terms::normalize;
use crate::loan::validation::validate;
use crate::types::ComputationOutput;
use crate::AmortizationResult;

/// Placeholder shown for sections that could not be computed.
pub const NOT_AVAILABLE: &str = "n/a";

const HIGH_RATE_PERCENT: Decimal = dec!(25);
const LONG_TERM_YEARS: Decimal = dec!(50);

/// Outcome of a loan calculation as handed to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanResults {
    /// The request failed validation; nothing was computed.
    Unavailable { messages: Vec<String> },
    Available {
        summary: Summary,
        amortization: Vec<FormattedRow>,
    },
}

impl LoanResults {
    pub fn is_available(&self) -> bool {
        matches!(self, LoanResults::Available { .. })
    }

    pub fn messages(&self) -> &[String] {
        match self {
            LoanResults::Unavailable { messages } => messages,
            LoanResults::Available { .. } => &[],
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            LoanResults::Available { summary, .. } => Some(summary),
            LoanResults::Unavailable { .. } => None,
        }
    }

    pub fn amortization(&self) -> Option<&[FormattedRow]> {
        match self {
            LoanResults::Available { amortization, .. } => Some(amortization),
            LoanResults::Unavailable { .. } => None,
        }
    }
}

/// `{"summary": .., "amortization": .., "messages": [..]}`, with `"n/a"` in
/// place of the sections of an unavailable result.
impl Serialize for LoanResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LoanResults", 3)?;
        match self {
            LoanResults::Unavailable { messages } => {
                state.serialize_field("summary", NOT_AVAILABLE)?;
                state.serialize_field("amortization", NOT_AVAILABLE)?;
                state.serialize_field("messages", messages)?;
            }
            LoanResults::Available {
                summary,
                amortization,
            } => {
                state.serialize_field("summary", summary)?;
                state.serialize_field("amortization", amortization)?;
                state.serialize_field("messages", &[] as &[String])?;
            }
        }
        state.end()
    }
}

/// Validate `request` and, if it passes, compute its summary and schedule.
///
/// A request that fails validation is not an error: it yields
/// [`LoanResults::Unavailable`] with every validation message. Errors are
/// reserved for numeric failures in the engine itself, such as overflow on
/// extreme terms.
pub fn get_results(request: &LoanRequest, fmt: &NumberFormat) -> AmortizationResult<LoanResults> {
    fmt.validate()?;

    let validation = validate(request);
    if !validation.is_valid() {
        return Ok(LoanResults::Unavailable {
            messages: validation.messages(),
        });
    }
    let loan = validation.into_validated(request)?;

    let terms = normalize(&loan)?;
    let payment = monthly_payment(loan.loan_amount, terms.monthly_rate, terms.total_months)?;
    let plan = payment_plan(loan.loan_amount, payment, terms.total_months)?;
    let summary = Summary::build(loan.loan_amount, &plan, fmt);

    let schedule = generate_schedule(
        loan.loan_amount,
        terms.monthly_rate,
        terms.total_months,
        payment,
    )?;
    let amortization = schedule
        .iter()
        .map(|row| FormattedRow::from_row(row, fmt))
        .collect();

    Ok(LoanResults::Available {
        summary,
        amortization,
    })
}

/// [`get_results`] wrapped in the standard computation envelope.
pub fn amortize(
    request: &LoanRequest,
    fmt: &NumberFormat,
) -> AmortizationResult<ComputationOutput<LoanResults>> {
    let start = Instant::now();

    let mut warnings: Vec<String> = Vec::new();
    if let Some(rate) = request.annual_rate_percent.as_decimal() {
        if rate > HIGH_RATE_PERCENT {
            warnings.push(format!(
                "Annual rate of {rate}% is unusually high; rates are percentages, not fractions"
            ));
        }
    }
    if let Some(years) = request.term_years.as_decimal() {
        if years > LONG_TERM_YEARS {
            warnings.push(format!("Term of {years} years is longer than typical loan terms"));
        }
    }

    let results = get_results(request, fmt)?;
    let elapsed = start.elapsed().as_micros() as u64;
    debug!("loan calculation finished in {elapsed}us");

    Ok(ComputationOutput::new(
        "Level-payment amortization (closed-form cumulative interest)",
        request,
        warnings,
        elapsed,
        results,
    ))
}

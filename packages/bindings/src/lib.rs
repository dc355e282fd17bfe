use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use amortize_core::loan::interest::cumulative_interest as closed_form_interest;
use amortize_core::loan::payment::monthly_payment as level_payment;
use amortize_core::loan::{self, LoanRequest, NumberFormat};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_format(format_json: Option<String>) -> NapiResult<NumberFormat> {
    match format_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(NumberFormat::default()),
    }
}

// ---------------------------------------------------------------------------
// Loan results
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize(request_json: String, format_json: Option<String>) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let fmt = parse_format(format_json)?;
    let output = loan::amortize(&request, &fmt).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_loan(request_json: String) -> NapiResult<String> {
    let request: LoanRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let validation = loan::validate(&request);
    serde_json::to_string(&serde_json::json!({
        "valid": validation.is_valid(),
        "messages": validation.messages(),
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formula primitives
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PaymentInput {
    loan_amount: Decimal,
    monthly_rate: Decimal,
    total_months: u32,
}

#[derive(Deserialize)]
struct InterestInput {
    loan_amount: Decimal,
    monthly_rate: Decimal,
    monthly_payment: Decimal,
    month_number: u32,
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let input: PaymentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = level_payment(input.loan_amount, input.monthly_rate, input.total_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}

#[napi]
pub fn cumulative_interest(input_json: String) -> NapiResult<String> {
    let input: InterestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let interest = closed_form_interest(
        input.loan_amount,
        input.monthly_rate,
        input.monthly_payment,
        input.month_number,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&interest).map_err(to_napi_error)
}

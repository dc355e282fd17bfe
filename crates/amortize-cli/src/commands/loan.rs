use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use amortize_core::loan::interest::{closed_form_balance, cumulative_interest};
use amortize_core::loan::payment::monthly_payment;
use amortize_core::loan::schedule::schedule_row;
use amortize_core::loan::terms::normalize;
use amortize_core::loan::{self, FormattedRow, LoanRequest, NumberFormat};
use amortize_core::ComputationOutput;

use crate::input;

/// Loan request fields. Values are passed to the validator as typed.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Principal borrowed (e.g. 500000)
    #[arg(long, alias = "amount")]
    pub loan_amount: Option<String>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan term in years
    #[arg(long)]
    pub years: Option<String>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the cumulative interest query
#[derive(Args)]
pub struct InterestArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Month number to report through (0 = origination)
    #[arg(long)]
    pub month: u32,
}

fn load_request(args: LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    input::load_request(
        args.input.as_deref(),
        (args.loan_amount, args.rate, args.years),
    )
}

pub fn run_schedule(
    args: LoanArgs,
    fmt: &NumberFormat,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = load_request(args)?;
    let result = loan::amortize(&request, fmt)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_example(fmt: &NumberFormat) -> Result<Value, Box<dyn std::error::Error>> {
    let request = LoanRequest::new(500000, 5, 30);
    let result = loan::amortize(&request, fmt)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(
    args: LoanArgs,
    fmt: &NumberFormat,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = load_request(args)?;
    let result = loan::amortize(&request, fmt)?;
    let mut value = serde_json::to_value(result)?;
    if let Some(Value::Object(res)) = value.get_mut("result") {
        res.remove("amortization");
    }
    Ok(value)
}

pub fn run_validate(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = load_request(args)?;
    let validation = loan::validate(&request);
    Ok(json!({
        "result": {
            "valid": validation.is_valid(),
            "messages": validation.messages(),
        }
    }))
}

pub fn run_interest(
    args: InterestArgs,
    fmt: &NumberFormat,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let month = args.month;
    let request = load_request(args.loan)?;

    let validation = loan::validate(&request);
    if !validation.is_valid() {
        return Ok(json!({
            "result": {
                "cumulative_interest": loan::calculator::NOT_AVAILABLE,
                "messages": validation.messages(),
            }
        }));
    }
    let validated = validation.into_validated(&request)?;
    let terms = normalize(&validated)?;
    if month > terms.total_months {
        return Err(format!(
            "--month must be between 0 and {} for this loan",
            terms.total_months
        )
        .into());
    }

    let principal = validated.loan_amount;
    let payment = monthly_payment(principal, terms.monthly_rate, terms.total_months)?;
    let interest = cumulative_interest(principal, terms.monthly_rate, payment, month)?;
    let balance = closed_form_balance(principal, terms.monthly_rate, payment, month)?;
    let row = if month == 0 {
        Value::Null
    } else {
        let row = schedule_row(
            principal,
            terms.monthly_rate,
            terms.total_months,
            payment,
            month,
        )?;
        serde_json::to_value(FormattedRow::from_row(&row, fmt))?
    };

    let output = ComputationOutput::new(
        "Closed-form cumulative interest",
        &request,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        json!({
            "month_number": month,
            "monthly_payment": fmt.format(payment),
            "cumulative_interest": fmt.format(interest),
            "principal_repaid": fmt.format(principal - balance),
            "balance": fmt.format(balance),
            "row": row,
        }),
    );
    Ok(serde_json::to_value(output)?)
}

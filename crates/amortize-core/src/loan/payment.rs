//! Level monthly payment for a fixed-rate loan.
//!
//! `payment = L·r / (1 − (1 + r)^−n)`

use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Summary totals derived from the monthly payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub monthly_payment: Money,
    /// Sum of every scheduled payment.
    pub total_payments: Money,
    pub total_interest: Money,
}

/// `(1 + r)^n`, the compound growth over `n` months.
pub(crate) fn growth_factor(monthly_rate: Rate, months: u32) -> AmortizationResult<Decimal> {
    if monthly_rate <= -Decimal::ONE {
        return Err(AmortizationError::InvalidInput {
            field: "monthly_rate".into(),
            reason: "Monthly rate must be greater than -100%".into(),
        });
    }
    (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(months))
        .ok_or_else(|| AmortizationError::Overflow {
            context: format!("compound growth over {months} months"),
        })
}

pub(crate) fn checked_product(
    a: Decimal,
    b: Decimal,
    context: &str,
) -> AmortizationResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| AmortizationError::Overflow {
        context: context.to_string(),
    })
}

/// Fixed monthly payment that retires `loan_amount` in `total_months`.
///
/// A zero rate makes the closed form undefined and is reported as a
/// division by zero rather than special-cased.
pub fn monthly_payment(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> AmortizationResult<Money> {
    if total_months == 0 {
        return Err(AmortizationError::InvalidInput {
            field: "total_months".into(),
            reason: "Number of months must be > 0".into(),
        });
    }
    if monthly_rate.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "monthly payment (zero rate)".into(),
        });
    }

    let factor = growth_factor(monthly_rate, total_months)?;
    let denominator = Decimal::ONE - Decimal::ONE / factor;
    if denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "monthly payment annuity factor".into(),
        });
    }

    let payment = checked_product(loan_amount, monthly_rate, "monthly payment")? / denominator;
    debug!("monthly payment {payment} for {loan_amount} over {total_months} months");
    Ok(payment)
}

/// Totals for a loan paid off with `monthly_payment` over `total_months`.
pub fn payment_plan(
    loan_amount: Money,
    monthly_payment: Money,
    total_months: u32,
) -> AmortizationResult<PaymentPlan> {
    let total_payments = checked_product(
        monthly_payment,
        Decimal::from(total_months),
        "total payments",
    )?;
    Ok(PaymentPlan {
        monthly_payment,
        total_payments,
        total_interest: total_payments - loan_amount,
    })
}

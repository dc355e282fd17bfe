//! Month-by-month amortization schedule.
//!
//! Each month's interest is the difference between consecutive cumulative
//! interest values, so the schedule stays consistent with the closed form
//! and the balance cannot drift over long terms.

use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AmortizationError;
use crate::loan::interest::{closed_form_balance, cumulative_interest};
use crate::types::{Money, Rate};
use crate::AmortizationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based.
    pub month_number: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding principal after this month's payment.
    pub balance: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule {
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationRow> {
        self.rows.iter()
    }

    pub fn total_principal(&self) -> Money {
        self.rows.iter().map(|r| r.principal).sum()
    }

    pub fn total_interest(&self) -> Money {
        self.rows.iter().map(|r| r.interest).sum()
    }

    /// Balance after the last payment, or zero for an empty schedule.
    pub fn final_balance(&self) -> Money {
        self.rows.last().map_or(Decimal::ZERO, |r| r.balance)
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationRow;
    type IntoIter = std::slice::Iter<'a, AmortizationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Build the full schedule, one row per month from 1 to `total_months`.
pub fn generate_schedule(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
    monthly_payment: Money,
) -> AmortizationResult<AmortizationSchedule> {
    let mut rows = Vec::with_capacity(total_months as usize);
    let mut balance = loan_amount;
    let mut previous_cumulative = Decimal::ZERO;

    for month_number in 1..=total_months {
        let cumulative =
            cumulative_interest(loan_amount, monthly_rate, monthly_payment, month_number)?;
        let interest = cumulative - previous_cumulative;
        let principal = monthly_payment - interest;
        balance -= principal;

        trace!("month {month_number}: principal={principal} interest={interest} balance={balance}");
        rows.push(AmortizationRow {
            month_number,
            payment: monthly_payment,
            principal,
            interest,
            balance,
        });
        previous_cumulative = cumulative;
    }

    debug!(
        "generated {} schedule rows, final balance {}",
        rows.len(),
        balance
    );
    Ok(AmortizationSchedule { rows })
}

/// Compute a single schedule row without walking the months before it.
///
/// Agrees with the matching row of [`generate_schedule`] up to decimal
/// rounding in the balance, which here comes straight from the closed form.
pub fn schedule_row(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
    monthly_payment: Money,
    month_number: u32,
) -> AmortizationResult<AmortizationRow> {
    if month_number == 0 || month_number > total_months {
        return Err(AmortizationError::InvalidInput {
            field: "month_number".into(),
            reason: format!("Month must be between 1 and {total_months}"),
        });
    }

    let before = cumulative_interest(loan_amount, monthly_rate, monthly_payment, month_number - 1)?;
    let through = cumulative_interest(loan_amount, monthly_rate, monthly_payment, month_number)?;
    let interest = through - before;

    Ok(AmortizationRow {
        month_number,
        payment: monthly_payment,
        principal: monthly_payment - interest,
        interest,
        balance: closed_form_balance(loan_amount, monthly_rate, monthly_payment, month_number)?,
    })
}

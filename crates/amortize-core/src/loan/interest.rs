//! Closed-form cumulative interest.
//!
//! Interest paid from origination through month `N` on a level-payment loan:
//!
//! `I(N) = (L·r − m)·((1 + r)^N − 1)/r + m·N`

use rust_decimal::Decimal;

use crate::error::AmortizationError;
use crate::loan::payment::{checked_product, growth_factor};
use crate::types::{Money, Rate};
use crate::AmortizationResult;

/// Total interest paid through `month_number` (0 → nothing paid yet).
pub fn cumulative_interest(
    loan_amount: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
    month_number: u32,
) -> AmortizationResult<Money> {
    if month_number == 0 {
        return Ok(Decimal::ZERO);
    }
    if monthly_rate.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "cumulative interest (zero rate)".into(),
        });
    }

    let accrual = checked_product(loan_amount, monthly_rate, "cumulative interest")?;
    let growth = growth_factor(monthly_rate, month_number)? - Decimal::ONE;
    let shortfall = checked_product(accrual - monthly_payment, growth, "cumulative interest")?;
    let paid = checked_product(
        monthly_payment,
        Decimal::from(month_number),
        "cumulative interest",
    )?;
    Ok(shortfall / monthly_rate + paid)
}

/// Principal still owed after `month_number` payments, from the closed form.
pub fn closed_form_balance(
    loan_amount: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
    month_number: u32,
) -> AmortizationResult<Money> {
    let interest = cumulative_interest(loan_amount, monthly_rate, monthly_payment, month_number)?;
    let paid = checked_product(
        monthly_payment,
        Decimal::from(month_number),
        "closed-form balance",
    )?;
    Ok(loan_amount - (paid - interest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::payment::monthly_payment;
    use crate::loan::terms::monthly_rate;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.005);

    fn reference() -> (Money, Rate, Money) {
        let loan = dec!(500000);
        let rate = monthly_rate(dec!(5));
        let pmt = monthly_payment(loan, rate, 360).unwrap();
        (loan, rate, pmt)
    }

    #[test]
    fn test_month_zero_is_zero() {
        let (loan, rate, pmt) = reference();
        assert_eq!(cumulative_interest(loan, rate, pmt, 0).unwrap(), Decimal::ZERO);
        // Any payment, any rate, including ones that would not amortize.
        assert_eq!(
            cumulative_interest(dec!(1), dec!(0.5), dec!(99999), 0).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_first_month_is_simple_interest() {
        let (loan, rate, pmt) = reference();
        let first = cumulative_interest(loan, rate, pmt, 1).unwrap();
        assert!((first - dec!(2083.33)).abs() < TOL, "got {first}");
    }

    #[test]
    fn test_full_term_interest_matches_plan() {
        let (loan, rate, pmt) = reference();
        let total = cumulative_interest(loan, rate, pmt, 360).unwrap();
        let expected = pmt * dec!(360) - loan;
        assert!((total - expected).abs() < dec!(0.000001), "got {total}");
    }

    #[test]
    fn test_cumulative_interest_increasing() {
        let (loan, rate, pmt) = reference();
        let mut prev = Decimal::ZERO;
        for month in 1..=360 {
            let cum = cumulative_interest(loan, rate, pmt, month).unwrap();
            assert!(cum > prev, "month {month}: {cum} <= {prev}");
            prev = cum;
        }
    }

    #[test]
    fn test_first_year_interest() {
        let (loan, rate, pmt) = reference();
        let year_one = cumulative_interest(loan, rate, pmt, 12).unwrap();
        assert!((year_one - dec!(24832.47)).abs() < TOL, "got {year_one}");
    }

    #[test]
    fn test_closed_form_balance_endpoints() {
        let (loan, rate, pmt) = reference();
        assert_eq!(closed_form_balance(loan, rate, pmt, 0).unwrap(), loan);
        let last = closed_form_balance(loan, rate, pmt, 360).unwrap();
        assert!(last.abs() < dec!(0.000001), "got {last}");
    }

    #[test]
    fn test_zero_rate_rejected() {
        let err = cumulative_interest(dec!(1000), Decimal::ZERO, dec!(100), 3).unwrap_err();
        assert!(matches!(err, AmortizationError::DivisionByZero { .. }));
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RealtyError;
use crate::loan::emi::{loan_terms, EmiInput};
use crate::types::{round_to_unit, Money};
use crate::RealtyResult;

/// One year of a reducing-balance repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    /// 1-based loan year
    pub year: u32,
    pub opening_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// Year-by-year breakdown of the loan described by `input`.
///
/// Interest accrues monthly on the outstanding balance and the final
/// installment absorbs any residual so the last closing balance is zero.
/// Balances are rounded to whole rupees per row; principal paid is the
/// difference of the rounded balances, so the column sums to the principal.
/// An empty loan (down payment covering the price) has no rows.
pub fn amortization_schedule(input: &EmiInput) -> RealtyResult<Vec<AmortizationYear>> {
    let terms = loan_terms(input)?;
    if terms.principal <= Decimal::ZERO {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    let mut balance = terms.principal;

    for year in 1..=input.tenure_years {
        let opening = balance;
        let mut interest_paid = Decimal::ZERO;

        for month in 1..=12 {
            let interest = balance
                .checked_mul(terms.monthly_rate)
                .ok_or_else(|| overflow(year))?;
            let is_last = year == input.tenure_years && month == 12;
            let principal_part = if is_last {
                balance
            } else {
                (terms.emi - interest).max(Decimal::ZERO).min(balance)
            };
            interest_paid = interest_paid
                .checked_add(interest)
                .ok_or_else(|| overflow(year))?;
            balance -= principal_part;
        }

        let opening_rounded = round_to_unit(opening);
        let closing_rounded = round_to_unit(balance);
        rows.push(AmortizationYear {
            year,
            opening_balance: opening_rounded,
            principal_paid: opening_rounded - closing_rounded,
            interest_paid: round_to_unit(interest_paid),
            closing_balance: closing_rounded,
        });
    }

    Ok(rows)
}

fn overflow(year: u32) -> RealtyError {
    RealtyError::Overflow {
        context: format!("interest for loan year {year}"),
    }
}

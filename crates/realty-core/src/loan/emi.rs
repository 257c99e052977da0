use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RealtyError;
use crate::types::{round_to_unit, with_metadata, ComputationOutput, Money, Rate};
use crate::RealtyResult;

/// Tenure slider range offered by the calculator, in years.
pub const TENURE_RANGE_YEARS: (u32, u32) = (5, 30);

/// Interest-rate slider range offered by the calculator, in percent p.a.
pub const RATE_RANGE_PCT: (Decimal, Decimal) = (dec!(5), dec!(15));

const MONTHS_PER_YEAR: u32 = 12;

/// Home-loan parameters as collected by the EMI calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    /// Property price in rupees
    pub property_price: Money,
    /// Down payment in rupees; the loan principal is price minus this
    pub down_payment: Money,
    /// Loan tenure in whole years
    pub tenure_years: u32,
    /// Annual interest rate in percent (8.5 = 8.5% p.a.)
    pub annual_rate_pct: Decimal,
}

impl Default for EmiInput {
    fn default() -> Self {
        Self {
            property_price: dec!(10_000_000),
            down_payment: dec!(2_000_000),
            tenure_years: 20,
            annual_rate_pct: dec!(8.5),
        }
    }
}

impl EmiInput {
    /// Build an input from raw floating-point form values.
    ///
    /// Non-finite values and fractional or negative tenures are rejected
    /// rather than clamped.
    pub fn from_f64(
        property_price: f64,
        down_payment: f64,
        tenure_years: f64,
        annual_rate_pct: f64,
    ) -> RealtyResult<Self> {
        if !tenure_years.is_finite() || tenure_years < 0.0 || tenure_years.fract() != 0.0 {
            return Err(RealtyError::InvalidInput {
                field: "tenure_years".into(),
                reason: format!("Tenure must be a whole number of years, got {tenure_years}"),
            });
        }
        if tenure_years > f64::from(u32::MAX) {
            return Err(RealtyError::InvalidInput {
                field: "tenure_years".into(),
                reason: "Tenure is too large".into(),
            });
        }

        Ok(Self {
            property_price: finite_decimal("property_price", property_price)?,
            down_payment: finite_decimal("down_payment", down_payment)?,
            tenure_years: tenure_years as u32,
            annual_rate_pct: finite_decimal("annual_rate_pct", annual_rate_pct)?,
        })
    }
}

/// Result of one EMI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutput {
    /// Amount borrowed (zero when the down payment covers the price)
    pub principal: Money,
    /// Equated monthly installment, rounded to whole rupees
    pub emi: Money,
    /// Interest paid over the full tenure, rounded to whole rupees
    pub total_interest: Money,
    /// principal + total_interest
    pub total_payment: Money,
    pub number_of_months: u32,
    /// Periodic rate as a decimal (annual_rate_pct / 100 / 12)
    pub monthly_rate: Rate,
}

/// Unrounded loan terms shared by the EMI and schedule calculations.
#[derive(Debug, Clone)]
pub(crate) struct LoanTerms {
    pub principal: Money,
    pub monthly_rate: Rate,
    pub number_of_months: u32,
    pub emi: Money,
}

/// Compute the monthly installment and total interest for a home loan.
///
/// principal = price - down payment; when that is not positive the loan is
/// empty and every figure is zero. Otherwise, with r the monthly rate and n
/// the number of months:
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when r = 0
///
/// Total interest is taken from the unrounded EMI (EMI * n - P); both values
/// are rounded half-up to whole rupees at the end.
pub fn compute_emi(input: &EmiInput) -> RealtyResult<EmiOutput> {
    let terms = loan_terms(input)?;

    if terms.principal <= Decimal::ZERO {
        return Ok(EmiOutput {
            principal: Decimal::ZERO,
            emi: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            number_of_months: terms.number_of_months,
            monthly_rate: terms.monthly_rate,
        });
    }

    let total_paid = terms
        .emi
        .checked_mul(Decimal::from(terms.number_of_months))
        .ok_or_else(|| RealtyError::Overflow {
            context: "total loan repayment".into(),
        })?;

    let total_interest = if terms.monthly_rate.is_zero() {
        Decimal::ZERO
    } else {
        round_to_unit(total_paid - terms.principal)
    };
    let principal = round_to_unit(terms.principal);

    Ok(EmiOutput {
        principal,
        emi: round_to_unit(terms.emi),
        total_interest,
        total_payment: principal + total_interest,
        number_of_months: terms.number_of_months,
        monthly_rate: terms.monthly_rate,
    })
}

/// EMI calculation wrapped in the standard output envelope, with warnings
/// for inputs outside the ranges the calculator offers.
pub fn calculate_emi(input: &EmiInput) -> RealtyResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = compute_emi(input)?;

    if input.down_payment >= input.property_price {
        warnings.push(format!(
            "Down payment ({}) covers the property price ({}); no loan required",
            input.down_payment, input.property_price
        ));
    }
    let (min_tenure, max_tenure) = TENURE_RANGE_YEARS;
    if input.tenure_years < min_tenure || input.tenure_years > max_tenure {
        warnings.push(format!(
            "Tenure of {} years is outside the usual {min_tenure}-{max_tenure} year range",
            input.tenure_years
        ));
    }
    let (min_rate, max_rate) = RATE_RANGE_PCT;
    if input.annual_rate_pct.is_zero() {
        warnings.push("Interest-free loan: EMI is principal divided by months".into());
    } else if input.annual_rate_pct < min_rate || input.annual_rate_pct > max_rate {
        warnings.push(format!(
            "Interest rate of {}% is outside the usual {min_rate}-{max_rate}% range",
            input.annual_rate_pct
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Reducing-balance EMI (standard amortization formula)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Tracks successive EMI values so a presentation layer can react only when
/// the installment actually moves.
#[derive(Debug, Clone, Default)]
pub struct EmiChangeTracker {
    last: Money,
}

impl EmiChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `emi` and report whether it differs from the previous value.
    /// The tracker starts at zero.
    pub fn observe(&mut self, emi: Money) -> bool {
        if emi == self.last {
            return false;
        }
        self.last = emi;
        true
    }

    pub fn last(&self) -> Money {
        self.last
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn loan_terms(input: &EmiInput) -> RealtyResult<LoanTerms> {
    validate_emi_input(input)?;

    let principal = input.property_price - input.down_payment;
    let monthly_rate = input.annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let number_of_months = input
        .tenure_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| RealtyError::Overflow {
            context: "tenure in months".into(),
        })?;

    if principal <= Decimal::ZERO {
        return Ok(LoanTerms {
            principal,
            monthly_rate,
            number_of_months,
            emi: Decimal::ZERO,
        });
    }

    let months = Decimal::from(number_of_months);
    let factor = annuity_factor(monthly_rate, number_of_months);
    let emi = match factor {
        Some(factor) => principal.checked_mul(factor).ok_or_else(|| RealtyError::Overflow {
            context: "EMI".into(),
        })?,
        None => principal / months,
    };

    Ok(LoanTerms {
        principal,
        monthly_rate,
        number_of_months,
        emi,
    })
}

/// Monthly installment per rupee borrowed: r * (1 + r)^n / ((1 + r)^n - 1).
///
/// Evaluated as r * (g / (g - 1)) so r is never multiplied by the raw
/// growth term. Once (1 + r)^n leaves the decimal range the factor has converged to
/// r. `None` means the rate is too small to move the growth term at all, and
/// the loan amortizes like an interest-free one (P / n).
fn annuity_factor(monthly_rate: Rate, number_of_months: u32) -> Option<Rate> {
    if monthly_rate.is_zero() {
        return None;
    }
    let growth = match (Decimal::ONE + monthly_rate).checked_powi(i64::from(number_of_months)) {
        Some(growth) => growth,
        None => return Some(monthly_rate),
    };
    let excess = growth - Decimal::ONE;
    if excess <= Decimal::ZERO {
        return None;
    }
    growth
        .checked_div(excess)
        .and_then(|ratio| monthly_rate.checked_mul(ratio))
        .or(Some(monthly_rate))
}

fn validate_emi_input(input: &EmiInput) -> RealtyResult<()> {
    if input.property_price < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "property_price".into(),
            reason: "Property price cannot be negative".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if input.tenure_years == 0 {
        return Err(RealtyError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be at least one year".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

fn finite_decimal(field: &str, value: f64) -> RealtyResult<Decimal> {
    if !value.is_finite() {
        return Err(RealtyError::InvalidInput {
            field: field.into(),
            reason: format!("{value} is not a finite number"),
        });
    }
    Decimal::from_f64(value).ok_or_else(|| RealtyError::InvalidInput {
        field: field.into(),
        reason: format!("{value} is out of range"),
    })
}

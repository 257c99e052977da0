use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use realty_core::loan::amortization::{amortization_schedule, AmortizationYear};
use realty_core::loan::emi::{calculate_emi, compute_emi, EmiInput, EmiOutput};

use crate::input;

/// Loan parameters shared by the EMI and schedule commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property price in rupees [default: 10000000]
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment in rupees [default: 2000000]
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Tenure in years [default: 20]
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Annual interest rate in percent, e.g. 8.5 [default: 8.5]
    #[arg(long)]
    pub rate: Option<Decimal>,
}

/// Arguments for the EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Debug, Serialize)]
struct ScheduleOutput {
    summary: EmiOutput,
    schedule: Vec<AmortizationYear>,
}

fn resolve_loan(args: LoanArgs) -> Result<EmiInput, Box<dyn std::error::Error>> {
    if let Some(loan) = input::resolve::<EmiInput>(&args.input)? {
        return Ok(loan);
    }

    let defaults = EmiInput::default();
    Ok(EmiInput {
        property_price: args.price.unwrap_or(defaults.property_price),
        down_payment: args.down_payment.unwrap_or(defaults.down_payment),
        tenure_years: args.tenure.unwrap_or(defaults.tenure_years),
        annual_rate_pct: args.rate.unwrap_or(defaults.annual_rate_pct),
    })
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(args.loan)?;
    tracing::debug!(?loan, "calculating EMI");

    let output = calculate_emi(&loan)?;
    tracing::debug!(emi = %output.result.emi, total_interest = %output.result.total_interest, "EMI calculated");
    Ok(serde_json::to_value(output)?)
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = resolve_loan(args.loan)?;
    tracing::debug!(?loan, "building amortization schedule");

    let output = ScheduleOutput {
        summary: compute_emi(&loan)?,
        schedule: amortization_schedule(&loan)?,
    };
    tracing::debug!(years = output.schedule.len(), "schedule built");
    Ok(serde_json::to_value(output)?)
}

use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use realty_core::currency::compact::format_usd_compact;
use realty_core::currency::indian::{
    format_indian_price, format_inr, parse_price_strict, parse_price_to_number,
};

/// Arguments for Indian-notation formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatPriceArgs {
    /// Amount in rupees (e.g. 28000000); non-numbers such as NaN render as ₹0
    #[arg(long)]
    pub amount: f64,
}

/// Arguments for compact dollar formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatUsdArgs {
    /// Amount in dollars (e.g. 4200000)
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for shorthand price parsing
#[derive(Args)]
pub struct ParsePriceArgs {
    /// Price text such as "2Cr", "1.5 Lakh" or "₹50,00,000"
    #[arg(long, allow_hyphen_values = true)]
    pub text: String,

    /// Reject malformed text instead of reading it as zero
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct FormattedAmount {
    amount: String,
    formatted: String,
}

#[derive(Debug, Serialize)]
struct ParsedPrice {
    text: String,
    rupees: Decimal,
    formatted: String,
    strict: bool,
}

pub fn run_format_price(args: FormatPriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let formatted = format_indian_price(args.amount);
    tracing::debug!(amount = args.amount, %formatted, "formatted rupee amount");
    Ok(serde_json::to_value(FormattedAmount {
        amount: args.amount.to_string(),
        formatted,
    })?)
}

pub fn run_format_usd(args: FormatUsdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let formatted = format_usd_compact(args.amount);
    tracing::debug!(amount = %args.amount, %formatted, "formatted dollar amount");
    Ok(serde_json::to_value(FormattedAmount {
        amount: args.amount.to_string(),
        formatted,
    })?)
}

pub fn run_parse_price(args: ParsePriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rupees = if args.strict {
        parse_price_strict(&args.text)?
    } else {
        parse_price_to_number(&args.text)
    };
    tracing::debug!(text = %args.text, %rupees, strict = args.strict, "parsed price");

    Ok(serde_json::to_value(ParsedPrice {
        formatted: format_inr(rupees),
        text: args.text,
        rupees,
        strict: args.strict,
    })?)
}

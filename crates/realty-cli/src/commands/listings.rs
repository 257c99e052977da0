use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use realty_core::currency::indian::parse_price_strict;
use realty_core::listings::matcher::{match_properties, MatchInput};
use realty_core::listings::records::{lead_field_errors, LeadInput, PropertyListing};

use crate::input;

/// Arguments for listing matching
#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with a listings array, or a full match request
    #[arg(long)]
    pub input: Option<String>,

    /// Budget ceiling, as rupees or shorthand ("2.5 Cr", "75 Lakh")
    #[arg(long)]
    pub budget: Option<String>,

    /// Location substring; "All Locations" disables the filter
    #[arg(long)]
    pub location: Option<String>,

    /// Maximum matches to return [default: 3]
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Arguments for enquiry validation
#[derive(Args)]
pub struct ValidateLeadArgs {
    /// JSON file with the enquiry (falls back to stdin)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
struct LeadValidation {
    valid: bool,
    errors: BTreeMap<String, String>,
}

// Either a full request or a bare listings array; flags fill the rest.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MatchSource {
    Request(MatchInput),
    Listings(Vec<PropertyListing>),
}

pub fn run_match(args: MatchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let budget: Option<Decimal> = args
        .budget
        .as_deref()
        .map(parse_price_strict)
        .transpose()?;

    let mut request = match input::resolve::<MatchSource>(&args.input)? {
        Some(MatchSource::Request(request)) => request,
        Some(MatchSource::Listings(properties)) => MatchInput {
            properties,
            budget: budget.ok_or("--budget is required when the input is a bare listings array")?,
            location: None,
            limit: None,
        },
        None => return Err("Provide listings via --input file or pipe JSON via stdin".into()),
    };

    if let Some(budget) = budget {
        request.budget = budget;
    }
    if args.location.is_some() {
        request.location = args.location;
    }
    if args.limit.is_some() {
        request.limit = args.limit;
    }

    tracing::debug!(
        listings = request.properties.len(),
        budget = %request.budget,
        location = ?request.location,
        "matching listings"
    );
    let output = match_properties(&request)?;
    tracing::debug!(matched = output.result.matched_ids.len(), "matching done");
    Ok(serde_json::to_value(output)?)
}

pub fn run_validate_lead(args: ValidateLeadArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lead: LeadInput = input::resolve(&args.input)?
        .ok_or("Provide the enquiry via --input file or pipe JSON via stdin")?;

    let errors = lead_field_errors(&lead);
    tracing::debug!(failing_fields = errors.len(), "validated enquiry");
    Ok(serde_json::to_value(LeadValidation {
        valid: errors.is_empty(),
        errors,
    })?)
}

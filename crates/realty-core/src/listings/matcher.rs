use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::currency::indian::format_inr;
use crate::error::RealtyError;
use crate::listings::records::{Lead, PropertyListing};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::RealtyResult;

/// Budget ceilings offered by the matcher, in rupees.
pub const BUDGET_OPTIONS: [Money; 6] = [
    dec!(5_000_000),
    dec!(10_000_000),
    dec!(25_000_000),
    dec!(50_000_000),
    dec!(100_000_000),
    dec!(500_000_000),
];

pub const ALL_LOCATIONS: &str = "All Locations";

pub const LOCATION_OPTIONS: [&str; 8] = [
    ALL_LOCATIONS,
    "Lutyens' Delhi",
    "DLF Phase 5",
    "Aerocity",
    "Vasant Vihar",
    "Greater Kailash",
    "Gurgaon",
    "Noida",
];

const DEFAULT_LIMIT: usize = 3;

/// A labelled budget choice for a picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOption {
    pub label: String,
    pub value: Money,
}

/// Budget choices labelled in Indian notation (`₹50,00,000` ...).
pub fn budget_options() -> Vec<BudgetOption> {
    BUDGET_OPTIONS
        .iter()
        .map(|value| BudgetOption {
            label: format_inr(*value),
            value: *value,
        })
        .collect()
}

/// Listings to search and the buyer's criteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInput {
    pub properties: Vec<PropertyListing>,
    /// Upper price bound in rupees (inclusive)
    pub budget: Money,
    /// Case-insensitive substring of the listing location; `None`, empty or
    /// "All Locations" disables the location filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Maximum number of matches to return (default 3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl MatchInput {
    /// Criteria derived from an enquiry: its budget, any location.
    pub fn for_lead(lead: &Lead, properties: Vec<PropertyListing>) -> RealtyResult<Self> {
        let budget = lead.budget_amount();
        if budget.is_zero() {
            return Err(RealtyError::InvalidInput {
                field: "budget".into(),
                reason: format!("Lead budget '{}' is not a rupee amount", lead.budget),
            });
        }
        Ok(Self {
            properties,
            budget,
            location: None,
            limit: None,
        })
    }
}

/// A listing that satisfied the criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMatch {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: Money,
    pub price_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutput {
    /// Ids of the matches, in listing order
    pub matched_ids: Vec<String>,
    pub matches: Vec<PropertyMatch>,
    /// Matches found before the limit was applied
    pub total_candidates: usize,
    pub budget_display: String,
}

/// Filter listings by budget ceiling and location, keeping listing order
/// and returning at most `limit` matches.
///
/// Prices go through the lenient shorthand parser, so a listing whose price
/// cannot be read counts as zero and always fits the budget; such listings
/// are reported in the warnings.
pub fn match_properties(input: &MatchInput) -> RealtyResult<ComputationOutput<MatchOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.budget < Decimal::ZERO {
        return Err(RealtyError::InvalidInput {
            field: "budget".into(),
            reason: "Budget cannot be negative".into(),
        });
    }
    let limit = input.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Err(RealtyError::InvalidInput {
            field: "limit".into(),
            reason: "Limit must be at least 1".into(),
        });
    }

    let location = input
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty() && *l != ALL_LOCATIONS)
        .map(str::to_lowercase);

    let mut candidates: Vec<PropertyMatch> = Vec::new();
    for listing in &input.properties {
        let price = listing.price_amount();

        let location_match = location
            .as_ref()
            .map_or(true, |l| listing.location.to_lowercase().contains(l.as_str()));
        if !location_match || price > input.budget {
            continue;
        }

        if price.is_zero() {
            warnings.push(format!(
                "Listing '{}' has unreadable price '{}'; treated as zero",
                listing.id, listing.price
            ));
        }

        candidates.push(PropertyMatch {
            id: listing.id.clone(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            price,
            price_display: listing.price_display(),
        });
    }

    let total_candidates = candidates.len();
    candidates.truncate(limit);

    let output = MatchOutput {
        matched_ids: candidates.iter().map(|m| m.id.clone()).collect(),
        matches: candidates,
        total_candidates,
        budget_display: format_inr(input.budget),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Budget ceiling and location substring filter",
        &serde_json::json!({
            "budget": input.budget,
            "location": input.location,
            "limit": limit,
            "listings": input.properties.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

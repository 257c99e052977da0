use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// `₹` + Indian grouping; NaN and infinities render as `₹0`.
#[napi]
pub fn format_indian_price(amount: f64) -> String {
    realty_core::currency::indian::format_indian_price(amount)
}

/// Lenient shorthand parse; unreadable text yields "0". Returned as a
/// decimal string so large crore values survive the trip to JavaScript.
#[napi]
pub fn parse_price_to_number(text: String) -> String {
    realty_core::currency::indian::parse_price_to_number(&text).to_string()
}

#[napi]
pub fn parse_price_strict(text: String) -> NapiResult<String> {
    realty_core::currency::indian::parse_price_strict(&text)
        .map(|rupees| rupees.to_string())
        .map_err(to_napi_error)
}

/// Amount accepted as a decimal string ("4200000").
#[napi]
pub fn format_usd_compact(amount: String) -> NapiResult<String> {
    let amount = Decimal::from_str(&amount).map_err(to_napi_error)?;
    Ok(realty_core::currency::compact::format_usd_compact(amount))
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: realty_core::loan::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = realty_core::loan::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// EMI from raw form values, rejecting non-finite numbers.
#[napi]
pub fn calculate_emi_from_form(
    property_price: f64,
    down_payment: f64,
    tenure_years: f64,
    annual_rate_pct: f64,
) -> NapiResult<String> {
    let input = realty_core::loan::emi::EmiInput::from_f64(
        property_price,
        down_payment,
        tenure_years,
        annual_rate_pct,
    )
    .map_err(to_napi_error)?;
    let output = realty_core::loan::emi::compute_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: realty_core::loan::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        realty_core::loan::amortization::amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[napi]
pub fn match_properties(input_json: String) -> NapiResult<String> {
    let input: realty_core::listings::matcher::MatchInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        realty_core::listings::matcher::match_properties(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Field-to-message map of everything wrong with an enquiry; empty when valid.
#[napi]
pub fn validate_lead(input_json: String) -> NapiResult<String> {
    let input: realty_core::listings::records::LeadInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors = realty_core::listings::records::lead_field_errors(&input);
    serde_json::to_string(&errors).map_err(to_napi_error)
}

#[napi]
pub fn budget_options() -> NapiResult<String> {
    serde_json::to_string(&realty_core::listings::matcher::budget_options()).map_err(to_napi_error)
}

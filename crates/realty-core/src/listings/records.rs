use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::currency::indian::{format_inr, parse_price_strict, parse_price_to_number};
use crate::error::RealtyError;
use crate::types::Money;
use crate::RealtyResult;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[\d\s\-()]{7,20}$").unwrap());

/// A property listing as stored by the CRUD backend.
///
/// `price` is free text ("2.8 Cr", "75 Lakh", "28000000"); use
/// [`PropertyListing::price_amount`] for the numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyListing {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Backend timestamp in nanoseconds since the Unix epoch
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
}

impl PropertyListing {
    /// Price in rupees via the lenient shorthand parser (zero when unreadable).
    pub fn price_amount(&self) -> Money {
        parse_price_to_number(&self.price)
    }

    /// Price for display: Indian-grouped rupees when the text reads as a
    /// positive amount, otherwise the stored text unchanged ("Price on request").
    pub fn price_display(&self) -> String {
        let amount = self.price_amount();
        if amount > Decimal::ZERO {
            format_inr(amount)
        } else {
            self.price.clone()
        }
    }
}

/// A contact-form enquiry before the backend has assigned it an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Budget range key selected on the form (e.g. "1m-5m")
    pub budget: String,
    #[serde(default, alias = "propertyType", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    pub message: String,
}

/// A stored enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub budget: String,
    pub message: String,
    #[serde(alias = "createdAt")]
    pub created_at: u64,
}

impl Lead {
    /// Build the stored record, trimming the free-text fields.
    pub fn from_input(id: impl Into<String>, input: &LeadInput, created_at: u64) -> Self {
        Self {
            id: id.into(),
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            email: input.email.trim().to_string(),
            budget: input.budget.clone(),
            message: input.message.trim().to_string(),
            created_at,
        }
    }

    /// Budget read strictly as a rupee shorthand; zero for range keys such
    /// as "1m-5m" that are not amounts.
    pub fn budget_amount(&self) -> Money {
        parse_price_strict(&self.budget).unwrap_or(Decimal::ZERO)
    }
}

/// Every failing field of an enquiry, keyed by field name.
pub fn lead_field_errors(input: &LeadInput) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if input.name.trim().is_empty() {
        errors.insert("name".to_string(), "Name is required".to_string());
    }

    let phone = input.phone.trim();
    if phone.is_empty() {
        errors.insert("phone".to_string(), "Phone is required".to_string());
    } else if !PHONE_PATTERN.is_match(phone) {
        errors.insert(
            "phone".to_string(),
            "Please enter a valid phone number".to_string(),
        );
    }

    let email = input.email.trim();
    if email.is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.insert(
            "email".to_string(),
            "Please enter a valid email address".to_string(),
        );
    }

    if input.budget.is_empty() {
        errors.insert(
            "budget".to_string(),
            "Please select a budget range".to_string(),
        );
    }

    if input.message.trim().is_empty() {
        errors.insert("message".to_string(), "Message is required".to_string());
    }

    errors
}

/// Reject an enquiry on its first failing field, in form order.
pub fn validate_lead(input: &LeadInput) -> RealtyResult<()> {
    let mut errors = lead_field_errors(input);
    for field in ["name", "phone", "email", "budget", "message"] {
        if let Some(reason) = errors.remove(field) {
            return Err(RealtyError::InvalidInput {
                field: field.into(),
                reason,
            });
        }
    }
    Ok(())
}

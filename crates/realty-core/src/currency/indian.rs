use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RealtyError;
use crate::types::{round_to_unit, Currency, Money};
use crate::RealtyResult;

pub const LAKH: Money = dec!(100_000);
pub const CRORE: Money = dec!(10_000_000);

/// What every lenient formatter falls back to.
pub const ZERO_DISPLAY: &str = "₹0";

// First lakh token only: "l", "lac" or "lakh".
static LAKH_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"l(?:ac|akh)?").unwrap());

// parseFloat-style prefix: "2.5abc" reads 2.5, "15e-1x" reads 1.5.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>[+-]?)(?P<digits>\d+\.?\d*|\.\d+)(?:[eE](?P<exp>[+-]?\d+))?").unwrap()
});

static STRICT_SHORTHAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<num>\d+(?:\.\d*)?|\.\d+)(?P<unit>crores?|cr|lakhs?|lacs?|l)?$").unwrap()
});

/// Unit suffix recognised in shorthand price strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceUnit {
    Rupee,
    Lakh,
    Crore,
}

impl PriceUnit {
    pub fn multiplier(&self) -> Money {
        match self {
            PriceUnit::Rupee => Decimal::ONE,
            PriceUnit::Lakh => LAKH,
            PriceUnit::Crore => CRORE,
        }
    }

    /// Map a lowercase suffix ("cr", "crores", "l", "lac", "lakhs", ...) to its unit.
    pub fn from_suffix(suffix: &str) -> Option<PriceUnit> {
        match suffix {
            "" => Some(PriceUnit::Rupee),
            "cr" | "crore" | "crores" => Some(PriceUnit::Crore),
            "l" | "lac" | "lacs" | "lakh" | "lakhs" => Some(PriceUnit::Lakh),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a rupee amount with Indian digit grouping.
///
/// 28000000 -> `₹2,80,00,000`, 5000000 -> `₹50,00,000`, 999 -> `₹999`.
/// The amount is rounded half-up to whole rupees first. Negative amounts
/// are grouped on their absolute value and carry a leading `-`.
pub fn format_inr(amount: Money) -> String {
    let rounded = round_to_unit(amount);
    let digits = rounded.abs().trunc().normalize().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{}",
        Currency::INR.symbol(),
        group_indian_digits(&digits)
    )
}

/// Lenient display formatter for raw user input.
///
/// NaN and infinities render as `₹0` instead of failing. So do finite
/// amounts beyond the decimal range (about 7.9e28, e.g. `1e29`): that output
/// is lossy, not a grouped figure. Callers needing exact large values should
/// build a `Decimal` and use [`format_inr`].
pub fn format_indian_price(amount: f64) -> String {
    if !amount.is_finite() {
        return ZERO_DISPLAY.to_string();
    }
    match Decimal::from_f64(amount) {
        Some(value) => format_inr(value),
        None => ZERO_DISPLAY.to_string(),
    }
}

/// Group a string of ASCII digits the Indian way: the last three digits form
/// one group, everything before it is split into pairs from the right.
pub fn group_indian_digits(digits: &str) -> String {
    if digits.len() <= 3 || !digits.is_ascii() {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Lenient shorthand parser used on the display and filtering paths.
///
/// Strips `₹`, commas and whitespace, then looks for a crore marker ("cr")
/// followed by a lakh marker ("l", "lac", "lakh"), scaling the leading number
/// accordingly. Whatever cannot be read as a number yields zero.
pub fn parse_price_to_number(text: &str) -> Money {
    if text.is_empty() {
        return Decimal::ZERO;
    }

    let cleaned = clean_price_text(text);

    let value = if cleaned.contains("cr") {
        leading_number(&cleaned.replacen("cr", "", 1)).and_then(|n| n.checked_mul(CRORE))
    } else if cleaned.contains('l') {
        leading_number(&LAKH_TOKEN.replacen(&cleaned, 1, "")).and_then(|n| n.checked_mul(LAKH))
    } else {
        leading_number(&cleaned)
    };

    value.map(round_to_unit).unwrap_or(Decimal::ZERO)
}

/// Strict shorthand parser for paths that must reject malformed prices.
///
/// The cleaned text must be a non-negative decimal optionally followed by a
/// single unit suffix (`cr`, `crore(s)`, `l`, `lac(s)`, `lakh(s)`).
pub fn parse_price_strict(text: &str) -> RealtyResult<Money> {
    let cleaned = clean_price_text(text);
    if cleaned.is_empty() {
        return Err(RealtyError::InvalidInput {
            field: "price".into(),
            reason: "Price text is empty".into(),
        });
    }

    let caps = STRICT_SHORTHAND
        .captures(&cleaned)
        .ok_or_else(|| RealtyError::InvalidInput {
            field: "price".into(),
            reason: format!("'{text}' is not a number with an optional Cr/Lakh suffix"),
        })?;

    let number = caps.name("num").map(|m| m.as_str()).unwrap_or_default();
    let suffix = caps.name("unit").map(|m| m.as_str()).unwrap_or_default();

    let unit = PriceUnit::from_suffix(suffix).ok_or_else(|| RealtyError::InvalidInput {
        field: "price".into(),
        reason: format!("Unknown unit suffix '{suffix}'"),
    })?;

    let base = parse_decimal_literal(number).ok_or_else(|| RealtyError::InvalidInput {
        field: "price".into(),
        reason: format!("'{number}' is out of range"),
    })?;

    let value = base
        .checked_mul(unit.multiplier())
        .ok_or_else(|| RealtyError::Overflow {
            context: format!("scaling '{text}' to rupees"),
        })?;

    Ok(round_to_unit(value))
}

fn clean_price_text(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '₹' && *c != ',' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Read the longest numeric prefix of `s`: optional sign, digits with an
/// optional fraction, optional exponent. Trailing text is ignored.
fn leading_number(s: &str) -> Option<Decimal> {
    let caps = NUMERIC_PREFIX.captures(s)?;
    let magnitude = parse_decimal_literal(&caps["digits"])?;
    let value = if &caps["sign"] == "-" {
        -magnitude
    } else {
        magnitude
    };

    match caps.name("exp") {
        Some(exp) => {
            let exponent: i64 = exp.as_str().parse().ok()?;
            // Beyond this every non-zero value leaves the decimal range.
            if exponent.abs() > 64 {
                return None;
            }
            Decimal::from_scientific(&format!("{value}e{exponent}")).ok()
        }
        None => Some(value),
    }
}

fn parse_decimal_literal(number: &str) -> Option<Decimal> {
    let trimmed = number.trim_end_matches('.');
    if trimmed.starts_with('.') {
        Decimal::from_str(&format!("0{trimmed}")).ok()
    } else {
        Decimal::from_str(trimmed).ok()
    }
}

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use realty_core::currency::compact::format_usd_compact;
use realty_core::currency::indian::{
    format_indian_price, format_inr, parse_price_strict, parse_price_to_number,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Indian grouping
// ===========================================================================

#[test]
fn test_format_zero_and_nan() {
    assert_eq!(format_inr(Decimal::ZERO), "₹0");
    assert_eq!(format_indian_price(0.0), "₹0");
    assert_eq!(format_indian_price(f64::NAN), "₹0");
}

#[test]
fn test_format_below_one_thousand_is_ungrouped() {
    assert_eq!(format_inr(dec!(999)), "₹999");
    assert_eq!(format_inr(dec!(7)), "₹7");
}

#[test]
fn test_format_known_amounts() {
    assert_eq!(format_inr(dec!(1000)), "₹1,000");
    assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
    assert_eq!(format_inr(dec!(28000000)), "₹2,80,00,000");
    assert_eq!(format_inr(dec!(5000000)), "₹50,00,000");
    assert_eq!(format_indian_price(28000000.0), "₹2,80,00,000");
}

#[test]
fn test_format_large_listing_price() {
    // Aerocity penthouse seed listing
    assert_eq!(format_inr(dec!(2_800_000_000)), "₹2,80,00,00,000");
}

// ===========================================================================
// Shorthand parsing
// ===========================================================================

#[test]
fn test_parse_shorthand_examples() {
    assert_eq!(parse_price_to_number(""), Decimal::ZERO);
    assert_eq!(parse_price_to_number("2Cr"), dec!(20_000_000));
    assert_eq!(parse_price_to_number("1.5L"), dec!(150_000));
    assert_eq!(parse_price_to_number("500000"), dec!(500_000));
    assert_eq!(parse_price_to_number("garbage"), Decimal::ZERO);
}

#[test]
fn test_parse_then_format_suffixed_shorthand() {
    assert_eq!(format_inr(parse_price_to_number("2.8 Cr")), "₹2,80,00,000");
    assert_eq!(format_inr(parse_price_to_number("50 Lakh")), "₹50,00,000");
}

#[test]
fn test_strict_and_lenient_agree_on_well_formed_input() {
    for text in ["2Cr", "1.5L", "500000", "75 lakh", "₹ 3.25 crore"] {
        assert_eq!(
            parse_price_strict(text).unwrap(),
            parse_price_to_number(text),
            "disagreement on {text:?}"
        );
    }
}

#[test]
fn test_strict_rejects_what_lenient_zeroes() {
    assert_eq!(parse_price_to_number("garbage"), Decimal::ZERO);
    assert!(parse_price_strict("garbage").is_err());
    assert_eq!(parse_price_to_number(""), Decimal::ZERO);
    assert!(parse_price_strict("").is_err());
}

// ===========================================================================
// Compact dollars
// ===========================================================================

#[test]
fn test_compact_dollar_examples() {
    assert_eq!(format_usd_compact(dec!(4_200_000)), "$4.2M");
    assert_eq!(format_usd_compact(dec!(420_000)), "$420K");
    assert_eq!(format_usd_compact(dec!(999)), "$999");
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn format_groups_have_indian_shape(n in 0u64..=1_000_000_000_000u64) {
        let formatted = format_inr(Decimal::from(n));
        prop_assert!(formatted.starts_with('₹'));

        let body = formatted.trim_start_matches('₹');
        let digit_count = n.to_string().len();
        let groups: Vec<&str> = body.split(',').collect();

        if digit_count > 3 {
            prop_assert_eq!(groups.len(), (digit_count - 3 + 1) / 2 + 1);
            prop_assert_eq!(groups.last().unwrap().len(), 3);
            for group in &groups[1..groups.len() - 1] {
                prop_assert_eq!(group.len(), 2);
            }
        } else {
            prop_assert_eq!(groups.len(), 1);
        }
        prop_assert_eq!(body.replace(',', ""), n.to_string());
    }

    #[test]
    fn format_is_idempotent(n in 0u64..=1_000_000_000_000u64) {
        let amount = Decimal::from(n);
        prop_assert_eq!(format_inr(amount), format_inr(amount));
    }

    #[test]
    fn plain_numbers_round_trip(n in 0u64..=1_000_000_000_000u64) {
        prop_assert_eq!(parse_price_to_number(&n.to_string()), Decimal::from(n));
    }

    #[test]
    fn lenient_parse_never_panics(text in "\\PC{0,24}") {
        let _ = parse_price_to_number(&text);
        let _ = parse_price_strict(&text);
    }

    #[test]
    fn lenient_format_never_panics(amount in any::<f64>()) {
        prop_assert!(format_indian_price(amount).contains('₹'));
    }
}

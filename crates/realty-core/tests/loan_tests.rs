use pretty_assertions::assert_eq;
use proptest::prelude::*;
use realty_core::loan::amortization::amortization_schedule;
use realty_core::loan::emi::{calculate_emi, compute_emi, EmiChangeTracker, EmiInput};
use realty_core::RealtyError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(price: Decimal, down: Decimal, years: u32, rate: Decimal) -> EmiInput {
    EmiInput {
        property_price: price,
        down_payment: down,
        tenure_years: years,
        annual_rate_pct: rate,
    }
}

/// Independent f64 recomputation with unrounded intermediates.
fn reference_emi(principal: f64, rate_pct: f64, years: u32) -> (f64, f64) {
    let n = f64::from(years * 12);
    let r = rate_pct / 100.0 / 12.0;
    if r == 0.0 {
        return (principal / n, 0.0);
    }
    let growth = (1.0 + r).powf(n);
    let emi = principal * r * growth / (growth - 1.0);
    (emi, emi * n - principal)
}

// ===========================================================================
// EMI branches
// ===========================================================================

#[test]
fn test_fully_paid_property_has_no_loan() {
    let out = compute_emi(&loan(dec!(2_000_000), dec!(2_000_000), 20, dec!(8.5))).unwrap();
    assert_eq!(out.emi, Decimal::ZERO);
    assert_eq!(out.total_interest, Decimal::ZERO);
}

#[test]
fn test_interest_free_loan() {
    let out = compute_emi(&loan(dec!(10_000_000), dec!(2_000_000), 20, Decimal::ZERO)).unwrap();
    // 80,00,000 / 240 = 33,333.33
    assert_eq!(out.emi, dec!(33_333));
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert_eq!(out.total_payment, dec!(8_000_000));
}

#[test]
fn test_standard_loan_matches_reference() {
    let out = compute_emi(&loan(dec!(10_000_000), dec!(2_000_000), 20, dec!(8.5))).unwrap();
    let (emi, interest) = reference_emi(8_000_000.0, 8.5, 20);

    assert!(out.emi > Decimal::ZERO);
    assert!((out.emi.to_f64().unwrap() - emi).abs() <= 1.0);
    assert!((out.total_interest.to_f64().unwrap() - interest).abs() <= 1.0);

    // Rounded EMI over the tenure lands within half a rupee per month of the
    // reported total repayment.
    let from_rounded = out.emi * dec!(240) - dec!(8_000_000);
    assert!((from_rounded - out.total_interest).abs() <= dec!(120));
}

#[test]
fn test_home_loan_15_years_at_9_pct() {
    // 40L over 15 years at 9%: EMI 40,570.66, interest 33,02,719.41
    let out = compute_emi(&loan(dec!(5_000_000), dec!(1_000_000), 15, dec!(9))).unwrap();
    assert_eq!(out.emi, dec!(40_571));
    assert_eq!(out.total_interest, dec!(3_302_719));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let cases = [
        loan(dec!(1_000_000), Decimal::ZERO, 0, dec!(8)),
        loan(dec!(1_000_000), Decimal::ZERO, 20, dec!(-0.5)),
        loan(dec!(-1), Decimal::ZERO, 20, dec!(8)),
    ];
    for input in &cases {
        match compute_emi(input) {
            Err(RealtyError::InvalidInput { .. }) => {}
            other => panic!("Expected InvalidInput for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_envelope_echoes_assumptions() {
    let result = calculate_emi(&EmiInput::default()).unwrap();
    assert_eq!(result.result.emi, dec!(69_426));
    assert_eq!(result.assumptions["tenure_years"], 20);
    assert!(result.methodology.contains("EMI"));
}

#[test]
fn test_tracker_follows_slider_changes() {
    let mut tracker = EmiChangeTracker::new();
    let mut pulses = 0;
    for rate in [dec!(8.5), dec!(8.5), dec!(9.0), dec!(9.0), dec!(9.1)] {
        let out = compute_emi(&loan(dec!(10_000_000), dec!(2_000_000), 20, rate)).unwrap();
        if tracker.observe(out.emi) {
            pulses += 1;
        }
    }
    assert_eq!(pulses, 3);
}

#[test]
fn test_growth_near_decimal_limit_does_not_panic() {
    // 300000% p.a. is 250 per month; 251^12 sits just under Decimal::MAX
    let input = loan(dec!(10_000_000), Decimal::ZERO, 1, dec!(300_000));
    let out = compute_emi(&input).unwrap();
    assert_eq!(out.monthly_rate, dec!(250));
    assert_eq!(out.emi, dec!(2_500_000_000));
    assert_eq!(out.total_interest, dec!(29_990_000_000));
    assert!(amortization_schedule(&input).is_ok());
}

#[test]
fn test_unbounded_growth_converges_to_interest_only() {
    // (1 + 1/12)^1200 is far outside the decimal range; EMI tends to P * r
    let input = loan(dec!(10_000_000), Decimal::ZERO, 100, dec!(100));
    let out = compute_emi(&input).unwrap();
    assert_eq!(out.emi, dec!(833_333));
    assert_eq!(out.total_interest, dec!(990_000_000));

    let rows = amortization_schedule(&input).unwrap();
    assert_eq!(rows.len(), 100);
    assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
}

#[test]
fn test_unrepresentable_emi_is_overflow() {
    // r = 1 per month, so the EMI exceeds the borrowed Decimal::MAX
    let input = loan(Decimal::MAX, Decimal::ZERO, 1, dec!(1200));
    match compute_emi(&input) {
        Err(RealtyError::Overflow { context }) => assert_eq!(context, "EMI"),
        other => panic!("Expected Overflow, got {other:?}"),
    }
    assert!(calculate_emi(&input).is_err());
    assert!(amortization_schedule(&input).is_err());
}

// ===========================================================================
// Amortization schedule
// ===========================================================================

#[test]
fn test_schedule_interest_matches_total_interest() {
    let input = EmiInput::default();
    let out = compute_emi(&input).unwrap();
    let rows = amortization_schedule(&input).unwrap();

    let interest: Decimal = rows.iter().map(|r| r.interest_paid).sum();
    assert!((interest - out.total_interest).abs() <= dec!(20));
    for pair in rows.windows(2) {
        assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
    }
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn emi_is_deterministic(
        price in 0u64..=1_000_000_000_000u64,
        down_pct in 0u32..=100u32,
        years in 1u32..=30u32,
        rate_bp in 0u32..=2_000u32,
    ) {
        let price = Decimal::from(price);
        let down = price * Decimal::from(down_pct) / dec!(100);
        let rate = Decimal::from(rate_bp) / dec!(100);
        let input = loan(price, down, years, rate);

        let first = compute_emi(&input).unwrap();
        let second = compute_emi(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn emi_tracks_reference_within_a_rupee(
        principal in 100_000u64..=100_000_000u64,
        years in 1u32..=30u32,
        rate_bp in 1u32..=2_000u32,
    ) {
        let rate = Decimal::from(rate_bp) / dec!(100);
        let out = compute_emi(&loan(Decimal::from(principal), Decimal::ZERO, years, rate)).unwrap();
        let (emi, interest) = reference_emi(principal as f64, f64::from(rate_bp) / 100.0, years);

        prop_assert!((out.emi.to_f64().unwrap() - emi).abs() <= 1.0);
        prop_assert!((out.total_interest.to_f64().unwrap() - interest).abs() <= 1.0);
        prop_assert!(out.total_interest >= Decimal::ZERO);
    }

    #[test]
    fn extreme_rates_and_tenures_still_compute(
        price in 1_000_000u64..=u64::MAX,
        years in 1u32..=100u32,
        rate_bp in 0u32..=10_000_000u32,
    ) {
        let rate = Decimal::from(rate_bp) / dec!(100);
        let input = loan(Decimal::from(price), Decimal::ZERO, years, rate);
        let out = compute_emi(&input).unwrap();
        prop_assert!(out.emi > Decimal::ZERO);
        prop_assert!(out.total_payment >= out.principal);
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{round_to_unit, Currency, Money};

const THOUSAND: Decimal = dec!(1_000);
const MILLION: Decimal = dec!(1_000_000);

/// Compact dollar display used by the comparison and wishlist views.
///
/// `>= 1M` renders with one decimal (`$4.2M`), `>= 1K` with none (`$420K`),
/// smaller amounts as whole dollars (`$999`).
pub fn format_usd_compact(amount: Money) -> String {
    let sign = if amount.is_sign_negative() && !round_to_unit(amount).is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = amount.abs();
    let symbol = Currency::USD.symbol();

    if magnitude >= MILLION {
        let millions = (magnitude / MILLION)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        format!("{sign}{symbol}{millions:.1}M")
    } else if magnitude >= THOUSAND {
        let thousands = (magnitude / THOUSAND)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{sign}{symbol}{thousands:.0}K")
    } else {
        format!("{sign}{symbol}{}", round_to_unit(magnitude).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millions_keep_one_decimal() {
        assert_eq!(format_usd_compact(dec!(4_200_000)), "$4.2M");
        assert_eq!(format_usd_compact(dec!(7_000_000)), "$7.0M");
        assert_eq!(format_usd_compact(dec!(9_250_000)), "$9.3M");
    }

    #[test]
    fn test_thousands_drop_decimals() {
        assert_eq!(format_usd_compact(dec!(420_000)), "$420K");
        assert_eq!(format_usd_compact(dec!(1_500)), "$2K");
        assert_eq!(format_usd_compact(dec!(999_400)), "$999K");
    }

    #[test]
    fn test_small_amounts_are_plain() {
        assert_eq!(format_usd_compact(dec!(999)), "$999");
        assert_eq!(format_usd_compact(Decimal::ZERO), "$0");
        assert_eq!(format_usd_compact(dec!(-250)), "-$250");
    }
}

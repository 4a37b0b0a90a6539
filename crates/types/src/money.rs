//! Minor-unit (cents) money helpers. No arbitrary-precision decimal type
//! is needed: every amount in this domain is an integer count of minor
//! units, and the one non-trivial operation (discount rounding) is a
//! single half-up division.

/// Rounds `numerator / denominator` half-up (ties away from zero) —
/// invoice amounts round half-up at minor-unit granularity.
///
/// Implemented with pure integer arithmetic: `(numerator * 2 + denominator) / (2 * denominator)`.
pub fn round_half_up_div(numerator: i64, denominator: i64) -> i64 {
    assert!(denominator > 0, "denominator must be positive");
    if numerator >= 0 {
        (numerator * 2 + denominator) / (2 * denominator)
    } else {
        -round_half_up_div(-numerator, denominator)
    }
}

/// Applies an online-payment discount percentage (0..=100) to an original
/// price in minor units, half-up rounded.
pub fn apply_discount_percent(original_cents: i64, percent: i64) -> (i64, i64) {
    let percent = percent.clamp(0, 100);
    if percent == 0 {
        return (original_cents, 0);
    }
    let final_cents = round_half_up_div(original_cents * (100 - percent), 100);
    let discount = original_cents - final_cents;
    (final_cents, discount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_rounding_scenario() {
        // original=12345, pct=5 -> 11727.75 -> 11728, discount 617
        let (final_cents, discount) = apply_discount_percent(12345, 5);
        assert_eq!(final_cents, 11728);
        assert_eq!(discount, 617);
    }

    #[test]
    fn zero_percent_is_noop() {
        assert_eq!(apply_discount_percent(10000, 0), (10000, 0));
    }

    #[test]
    fn clamps_out_of_range_percent() {
        let (final_cents, _) = apply_discount_percent(10000, 150);
        assert_eq!(final_cents, 0);
        let (final_cents, _) = apply_discount_percent(10000, -10);
        assert_eq!(final_cents, 10000);
    }

    #[test]
    fn half_up_ties_round_away_from_zero() {
        assert_eq!(round_half_up_div(5, 2), 3);
        assert_eq!(round_half_up_div(-5, 2), -3);
    }
}

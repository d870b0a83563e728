use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);

/// Round half up: `floor(x * 10^dp + 0.5) / 10^dp`. Midpoints move toward
/// positive infinity, so negative midpoints round toward zero. Rounds in
/// place without scaling, so it cannot overflow.
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy).normalize()
}

/// Round to 2 decimal places, half up.
pub fn round_cents(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}

/// Round to 1 decimal place, half up.
pub fn round_tenths(value: Decimal) -> Decimal {
    round_half_up(value, 1)
}

/// Smallest 2-decimal value that is `>= value`.
pub fn ceil_cents(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
        .normalize()
}

/// Apply a percentage stored as a plain number: `rate * base / 100`.
/// Saturates at the `Decimal` bounds.
pub fn percent_of(rate: Decimal, base: Decimal) -> Decimal {
    rate.saturating_mul(base) / HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_midpoint_goes_up() {
        assert_eq!(round_cents(dec!(1.005)), dec!(1.01));
        assert_eq!(round_cents(dec!(2.675)), dec!(2.68));
        assert_eq!(round_cents(dec!(1.004999)), dec!(1.00));
    }

    #[test]
    fn test_round_cents_negative_midpoint_toward_positive() {
        assert_eq!(round_cents(dec!(-1.005)), dec!(-1.00));
        assert_eq!(round_cents(dec!(-1.006)), dec!(-1.01));
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(dec!(6654.9756)), dec!(6655.0));
        assert_eq!(round_tenths(dec!(12.25)), dec!(12.3));
        assert_eq!(round_tenths(dec!(12.24)), dec!(12.2));
    }

    #[test]
    fn test_ceil_cents() {
        assert_eq!(ceil_cents(dec!(1.001)), dec!(1.01));
        assert_eq!(ceil_cents(dec!(1067.58)), dec!(1067.58));
        assert_eq!(ceil_cents(dec!(-1.009)), dec!(-1.00));
    }

    #[test]
    fn test_rounding_at_decimal_bounds() {
        assert_eq!(round_cents(Decimal::MAX), Decimal::MAX);
        assert_eq!(round_tenths(Decimal::MIN), Decimal::MIN);
        assert_eq!(ceil_cents(Decimal::MAX), Decimal::MAX);
        assert_eq!(percent_of(dec!(150), Decimal::MAX), Decimal::MAX / HUNDRED);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(10), dec!(907.7)), dec!(90.77));
        assert_eq!(percent_of(dec!(0.5), dec!(1031.22)), dec!(5.1561));
    }
}

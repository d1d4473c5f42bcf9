/// Round a monetary value to 2 decimal places (half away from zero)
///
/// Goes through `rust_decimal` so that `0.1 + 0.2` style binary artefacts
/// do not leak into prices. `None` when the value has no decimal form
/// (NaN, infinite, or beyond the decimal range).
pub fn round_money(value: f64) -> Option<f64> {
    use rust_decimal::prelude::*;

    Decimal::from_f64(value)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(15.0), Some(15.0));
        assert_eq!(round_money(12.346), Some(12.35));
        assert_eq!(round_money(0.1 + 0.2), Some(0.3));
        assert_eq!(round_money(-7.5), Some(-7.5));
    }

    #[test]
    fn test_round_money_rejects_unrepresentable() {
        assert_eq!(round_money(1e29), None);
        assert_eq!(round_money(f64::NAN), None);
        assert_eq!(round_money(f64::INFINITY), None);
    }
}

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::types::InterestType;

/// interest owed on top of the principal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterestCalculation {
    pub initial_interest: Money,
    /// principal plus interest, before any penalty
    pub base_total: Money,
}

/// flat interest: a percent of the principal or a fixed amount, never time-dependent
pub fn calculate_interest(amount: Money, rate: Decimal, interest_type: InterestType) -> InterestCalculation {
    let initial_interest = match interest_type {
        InterestType::FixedValue => Money::from_decimal(rate),
        InterestType::Percentage => amount.apply(Rate::from_percent(rate)),
    };

    InterestCalculation {
        initial_interest,
        base_total: amount + initial_interest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_interest() {
        let result = calculate_interest(Money::from_major(1_000), dec!(10), InterestType::Percentage);
        assert_eq!(result.initial_interest, Money::from_major(100));
        assert_eq!(result.base_total, Money::from_major(1_100));
    }

    #[test]
    fn test_fractional_percentage() {
        let result = calculate_interest(Money::from_major(850), dec!(12.5), InterestType::Percentage);
        assert_eq!(result.initial_interest, Money::from_str_exact("106.25").unwrap());
    }

    #[test]
    fn test_fixed_value_ignores_principal() {
        for amount in [0, 1_000, 50_000] {
            let result = calculate_interest(Money::from_major(amount), dec!(200), InterestType::FixedValue);
            assert_eq!(result.initial_interest, Money::from_major(200));
            assert_eq!(result.base_total, Money::from_major(amount + 200));
        }
    }

    #[test]
    fn test_negative_inputs_pass_through() {
        let result = calculate_interest(Money::from_major(-100), dec!(10), InterestType::Percentage);
        assert_eq!(result.initial_interest, Money::from_major(-10));
        assert_eq!(result.base_total, Money::from_major(-110));
    }
}

use rust_decimal::Decimal;

use crate::calculation::overdue::OverdueAssessment;
use crate::decimal::{Money, Rate};
use crate::types::PenaltyType;

/// penalty configuration of a single loan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyConfig {
    pub penalty_type: PenaltyType,
    /// percent or currency amount, per `penalty_type`
    pub rate: Decimal,
}

impl PenaltyConfig {
    pub fn new(penalty_type: PenaltyType, rate: Decimal) -> Self {
        Self { penalty_type, rate }
    }
}

/// penalty calculation result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyCalculation {
    pub penalty_amount: Money,
    /// days the penalty was multiplied by; 1 for one-time penalties that applied
    pub days_charged: u32,
    pub base_total: Money,
}

/// engine for late-payment penalties
pub struct PenaltyEngine {
    pub config: PenaltyConfig,
}

impl PenaltyEngine {
    pub fn new(config: PenaltyConfig) -> Self {
        Self { config }
    }

    /// penalty on a loan's base total given how late it is
    ///
    /// Daily percentages are taken from the base total every day, so the penalty grows
    /// linearly with the days late and never compounds on earlier penalties. An amount past
    /// the decimal range is capped at `Decimal::MAX`.
    pub fn calculate_penalty(&self, base_total: Money, overdue: &OverdueAssessment) -> PenaltyCalculation {
        if !overdue.is_overdue || overdue.days_overdue == 0 {
            return PenaltyCalculation {
                penalty_amount: Money::ZERO,
                days_charged: 0,
                base_total,
            };
        }

        let days = overdue.days_overdue;
        let rate = self.config.rate;
        let penalty_type = self.config.penalty_type;
        let penalty_amount = match penalty_type {
            PenaltyType::DailyPercentage => base_total.apply(Rate::from_percent(rate)).times(days as i64),
            PenaltyType::DailyValue => Money::from_decimal(rate).times(days as i64),
            PenaltyType::FixedValue => Money::from_decimal(rate),
            PenaltyType::Fixed => base_total.apply(Rate::from_percent(rate)),
        };
        let days_charged = if penalty_type.is_daily() { days } else { 1 };

        PenaltyCalculation {
            penalty_amount,
            days_charged,
            base_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn late(days: u32) -> OverdueAssessment {
        OverdueAssessment {
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            is_overdue: days > 0,
            days_overdue: days,
        }
    }

    fn penalty(penalty_type: PenaltyType, rate: Decimal, days: u32) -> Money {
        PenaltyEngine::new(PenaltyConfig::new(penalty_type, rate))
            .calculate_penalty(Money::from_major(1_100), &late(days))
            .penalty_amount
    }

    #[test]
    fn test_fixed_percentage_applies_once() {
        assert_eq!(penalty(PenaltyType::Fixed, dec!(5), 5), Money::from_major(55));
        assert_eq!(penalty(PenaltyType::Fixed, dec!(5), 40), Money::from_major(55));
    }

    #[test]
    fn test_fixed_value_applies_once() {
        assert_eq!(penalty(PenaltyType::FixedValue, dec!(30), 1), Money::from_major(30));
        assert_eq!(penalty(PenaltyType::FixedValue, dec!(30), 90), Money::from_major(30));
    }

    #[test]
    fn test_daily_value() {
        assert_eq!(penalty(PenaltyType::DailyValue, dec!(10), 5), Money::from_major(50));
    }

    #[test]
    fn test_daily_percentage_is_linear() {
        // 1% of 1100 = 11 per day
        assert_eq!(penalty(PenaltyType::DailyPercentage, dec!(1), 1), Money::from_major(11));
        assert_eq!(penalty(PenaltyType::DailyPercentage, dec!(1), 10), Money::from_major(110));
        assert_eq!(penalty(PenaltyType::DailyPercentage, dec!(1), 100), Money::from_major(1_100));
    }

    #[test]
    fn test_no_penalty_when_not_late() {
        for penalty_type in [
            PenaltyType::Fixed,
            PenaltyType::FixedValue,
            PenaltyType::DailyPercentage,
            PenaltyType::DailyValue,
        ] {
            let result = PenaltyEngine::new(PenaltyConfig::new(penalty_type, dec!(5)))
                .calculate_penalty(Money::from_major(1_100), &late(0));
            assert_eq!(result.penalty_amount, Money::ZERO);
            assert_eq!(result.days_charged, 0);
        }
    }

    #[test]
    fn test_days_charged() {
        let engine = PenaltyEngine::new(PenaltyConfig::new(PenaltyType::DailyValue, dec!(2)));
        assert_eq!(engine.calculate_penalty(Money::from_major(100), &late(7)).days_charged, 7);

        let engine = PenaltyEngine::new(PenaltyConfig::new(PenaltyType::Fixed, dec!(2)));
        assert_eq!(engine.calculate_penalty(Money::from_major(100), &late(7)).days_charged, 1);

        let engine = PenaltyEngine::new(PenaltyConfig::new(PenaltyType::DailyPercentage, dec!(2)));
        assert_eq!(engine.calculate_penalty(Money::from_major(100), &late(3)).days_charged, 3);

        let engine = PenaltyEngine::new(PenaltyConfig::new(PenaltyType::FixedValue, dec!(2)));
        assert_eq!(engine.calculate_penalty(Money::from_major(100), &late(3)).days_charged, 1);
    }

    /// a rate near the decimal limit saturates instead of overflowing
    #[test]
    fn test_huge_daily_rate_is_capped() {
        assert_eq!(penalty(PenaltyType::DailyValue, Decimal::MAX / dec!(2), 10).as_decimal(), Decimal::MAX);
        assert_eq!(penalty(PenaltyType::DailyPercentage, Decimal::MAX / dec!(2), 10).as_decimal(), Decimal::MAX);
    }
}

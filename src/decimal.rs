use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// internal precision kept on every money operation
pub const MONEY_SCALE: u32 = 8;

/// Money type backed by a decimal, rounded to 8 places on every operation
///
/// Arithmetic saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing, so one
/// absurd record cannot abort a whole recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s.trim())?.round_dp(MONEY_SCALE)))
    }

    /// create from integer amount (reais, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// apply a rate expressed as a fraction
    pub fn apply(&self, rate: Rate) -> Self {
        let factor = rate.as_decimal();
        saturated(self.0.checked_mul(factor), overflow_sign(self.0, factor))
    }

    /// multiply by a whole number of periods (days, installments)
    pub fn times(&self, periods: i64) -> Self {
        let factor = Decimal::from(periods);
        saturated(self.0.checked_mul(factor), overflow_sign(self.0, factor))
    }

    /// split into `parts` equal shares without redistributing the remainder
    pub fn split(&self, parts: u32) -> Self {
        if parts == 0 {
            return *self;
        }
        Money((self.0 / Decimal::from(parts)).round_dp(MONEY_SCALE))
    }
}

// sign of a product that overflowed
fn overflow_sign(a: Decimal, b: Decimal) -> bool {
    a.is_sign_negative() != b.is_sign_negative()
}

fn saturated(result: Option<Decimal>, negative: bool) -> Money {
    match result {
        Some(value) => Money(value.round_dp(MONEY_SCALE)),
        None if negative => Money(Decimal::MIN),
        None => Money(Decimal::MAX),
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        // an addition only overflows when both sides share a sign
        saturated(self.0.checked_add(other.0), self.0.is_sign_negative())
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        saturated(self.0.checked_sub(other.0), self.0.is_sign_negative())
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// rate type for percentages and ratios, stored as a fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// create from a percent figure as typed on a loan form (e.g., 2.5 for 2.5%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::from(100))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_percent_rate() {
        assert_eq!(Rate::from_percent(dec!(2.5)).as_decimal(), dec!(0.025));
        assert_eq!(Money::from_major(1_100).apply(Rate::from_percent(dec!(5))), Money::from_major(55));
    }

    #[test]
    fn test_split_keeps_remainder_out() {
        let total = Money::from_major(1_000);
        let share = total.split(3);
        assert_eq!(share, Money::from_str_exact("333.33333333").unwrap());
        assert_eq!(total.split(0), total);
    }

    #[test]
    fn test_sum_and_sign() {
        let values = [Money::from_major(10), Money::from_major(-4), Money::from_major(1)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_major(7));
        assert!(Money::from_major(-1).is_negative());
        assert!(!Money::ZERO.is_positive());
        assert!(!Money::ZERO.is_negative());
        assert_eq!(-Money::from_major(3), Money::from_major(-3));
    }

    #[test]
    fn test_overflow_saturates() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!((huge + Money::from_major(1)).as_decimal(), Decimal::MAX);
        assert_eq!((-huge - Money::from_major(1)).as_decimal(), Decimal::MIN);
        assert_eq!(huge.times(10).as_decimal(), Decimal::MAX);
        assert_eq!(huge.times(-10).as_decimal(), Decimal::MIN);
        assert_eq!(huge.apply(Rate::from_percent(dec!(500))).as_decimal(), Decimal::MAX);
        // no overflow, no change
        assert_eq!(huge - Money::from_major(1), Money::from_decimal(Decimal::MAX - Decimal::ONE));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_str_exact("10.50").unwrap()).unwrap();
        assert_eq!(json, "\"10.50\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_str_exact("10.5").unwrap());
    }
}

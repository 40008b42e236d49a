use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Number of decimal places carried by every amount in the ledger.
pub const MINOR_UNIT_SCALE: u32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoneyError {
    #[error("Amount {0} has more than 2 decimal places")]
    TooPrecise(String),
    #[error("Amount {0} is out of range")]
    OutOfRange(String),
}

/// A signed amount held as an integer count of minor units (cents).
///
/// All ledger arithmetic happens on this type. `Decimal` only appears at the
/// boundary, through [`Money::from_decimal`] and [`Money::to_decimal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Decimal", try_from = "Decimal")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor_units: i64) -> Self {
        Money(minor_units)
    }

    pub fn minor_units(self) -> i64 {
        self.0
    }

    /// Strict conversion: fails instead of rounding.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        if value.normalize().scale() > MINOR_UNIT_SCALE {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        Self::scaled(value)
    }

    /// Rounds half away from zero to the minor unit.
    pub fn from_decimal_rounded(value: Decimal) -> Result<Self, MoneyError> {
        Self::scaled(value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero))
    }

    fn scaled(value: Decimal) -> Result<Self, MoneyError> {
        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|units| units.to_i64())
            .map(Money)
            .ok_or_else(|| MoneyError::OutOfRange(value.to_string()))
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.to_decimal()
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn strict_conversion_keeps_cents() {
        assert_eq!(Money::from_decimal(dec("10.50")).unwrap().minor_units(), 1050);
        assert_eq!(Money::from_decimal(dec("3")).unwrap().minor_units(), 300);
        assert_eq!(Money::from_decimal(dec("1.2000")).unwrap().minor_units(), 120);
    }

    #[test]
    fn strict_conversion_rejects_fractional_cents() {
        assert!(matches!(
            Money::from_decimal(dec("0.001")),
            Err(MoneyError::TooPrecise(_))
        ));
    }

    #[test]
    fn rounded_conversion_goes_half_away_from_zero() {
        assert_eq!(Money::from_decimal_rounded(dec("0.125")).unwrap().minor_units(), 13);
        assert_eq!(Money::from_decimal_rounded(dec("-0.125")).unwrap().minor_units(), -13);
        assert_eq!(Money::from_decimal_rounded(dec("3.3333")).unwrap().minor_units(), 333);
    }

    #[test]
    fn serializes_as_decimal() {
        let json = serde_json::to_string(&Money::from_minor(334)).unwrap();
        assert_eq!(json, "\"3.34\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_minor(334));
    }
}

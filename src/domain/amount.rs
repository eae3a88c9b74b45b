use crate::error::PluginError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two amounts closer than this are treated as the same amount.
const EPSILON: Decimal = dec!(0.00000001);

/// A monetary value as exchanged with the framework and the gateway.
///
/// Wraps `rust_decimal::Decimal` so comparisons never go through binary
/// floating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Decimal-tolerant equality.
    pub fn matches(&self, other: &Amount) -> bool {
        (self.0 - other.0).abs() < EPSILON
    }

    /// Renders the amount with exactly two decimal places, rounding half away from zero.
    pub fn to_gateway_format(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Decimal::from_str(s.trim())?))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ignores_scale() {
        let a = Amount::new(dec!(100.00));
        let b = Amount::new(dec!(100));
        assert!(a.matches(&b));
    }

    #[test]
    fn test_matches_detects_one_cent() {
        let a = Amount::new(dec!(100.00));
        let b = Amount::new(dec!(99.99));
        assert!(!a.matches(&b));
    }

    #[test]
    fn test_matches_within_tolerance() {
        let a = Amount::new(dec!(10.000000001));
        let b = Amount::new(dec!(10.0));
        assert!(a.matches(&b));
    }

    #[test]
    fn test_gateway_format() {
        assert_eq!(Amount::new(dec!(5)).to_gateway_format(), "5.00");
        assert_eq!(Amount::new(dec!(12.345)).to_gateway_format(), "12.35");
        assert_eq!(Amount::new(dec!(0.1)).to_gateway_format(), "0.10");
    }

    #[test]
    fn test_parse_gateway_amount() {
        let amount: Amount = " 42.50".parse().unwrap();
        assert_eq!(amount, Amount::new(dec!(42.50)));
        assert!(matches!(
            "abc".parse::<Amount>(),
            Err(PluginError::AmountError(_))
        ));
    }
}

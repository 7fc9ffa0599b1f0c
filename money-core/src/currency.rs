//! ISO 4217 currencies and their minor-unit precision
//!
//! The currency table is fixed at compile time: the enum is the registry.
//! Precision is part of the type, never a runtime parameter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency with minor-unit precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Currency {
    /// Euro (2 decimals)
    EUR,
    /// US Dollar (2 decimals)
    USD,
    /// British Pound (2 decimals)
    GBP,
    /// Japanese Yen (no minor unit)
    JPY,
    /// Kuwaiti Dinar (3 decimals)
    KWD,
    /// Bitcoin (8 decimals, 1 BTC = 100,000,000 satoshi)
    BTC,
}

impl Currency {
    /// ISO 4217 alphabetic code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::KWD => "KWD",
            Currency::BTC => "BTC",
        }
    }

    /// Parse from an ISO 4217 code
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "KWD" => Some(Currency::KWD),
            "BTC" => Some(Currency::BTC),
            _ => None,
        }
    }

    /// Number of minor-unit decimals (EUR=2, JPY=0, KWD=3)
    pub fn decimals(&self) -> u32 {
        match self {
            Currency::EUR | Currency::USD | Currency::GBP => 2,
            Currency::JPY => 0,
            Currency::KWD => 3,
            Currency::BTC => 8,
        }
    }

    /// Conversion factor from major to minor units
    pub fn multiplier(&self) -> i128 {
        10i128.pow(self.decimals())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("EUR"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("KWD"), Some(Currency::KWD));
        assert_eq!(Currency::from_code("XXX"), None);
    }

    #[test]
    fn test_multiplier() {
        assert_eq!(Currency::EUR.multiplier(), 100);
        assert_eq!(Currency::JPY.multiplier(), 1);
        assert_eq!(Currency::KWD.multiplier(), 1000);
        assert_eq!(Currency::BTC.multiplier(), 100_000_000);
    }

    #[test]
    fn test_code_round_trip() {
        for c in [
            Currency::EUR,
            Currency::USD,
            Currency::GBP,
            Currency::JPY,
            Currency::KWD,
            Currency::BTC,
        ] {
            assert_eq!(Currency::from_code(c.code()), Some(c));
        }
    }
}

//! Rounding strategies for percentage-based monetary operations
//!
//! Every fiscal operation rounds at most once, through an explicit mode.
//! The crate-wide default is [`RoundingMode::HalfEven`] (banker's rounding):
//! it minimizes statistical bias and matches the IEEE 754 default. Regimes
//! that mandate a different rule pass a mode to the `*_with` variants.

use serde::{Deserialize, Serialize};

/// Rounding strategy applied to a fractional minor-unit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Commercial rounding, 0.5 rounds up (toward positive infinity on ties)
    HalfUp,
    /// Banker's rounding, ties go to the even neighbor
    HalfEven,
    /// Truncation toward zero
    Down,
    /// Away from zero
    Up,
    /// Ties round toward zero
    HalfDown,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::HalfEven
    }
}

impl RoundingMode {
    /// Round a fractional value to integer minor units.
    ///
    /// Exact only while `value` is within f64's integer-exact range (2^53);
    /// callers at that magnitude should not be deriving amounts from floats.
    pub fn apply(&self, value: f64) -> i128 {
        let rounded = match self {
            RoundingMode::HalfUp => (value + 0.5).floor(),
            RoundingMode::HalfEven => half_even(value),
            RoundingMode::Down => value.trunc(),
            RoundingMode::Up => {
                if value >= 0.0 {
                    value.ceil()
                } else {
                    value.floor()
                }
            }
            RoundingMode::HalfDown => {
                if value >= 0.0 {
                    (value - 0.5).ceil()
                } else {
                    (value + 0.5).floor()
                }
            }
        };
        rounded as i128
    }
}

fn half_even(value: f64) -> f64 {
    let floor = value.floor();
    let fraction = value - floor;
    if fraction > 0.5 {
        floor + 1.0
    } else if fraction < 0.5 {
        floor
    } else if (floor as i128) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_even_ties() {
        let mode = RoundingMode::HalfEven;
        assert_eq!(mode.apply(0.5), 0);
        assert_eq!(mode.apply(1.5), 2);
        assert_eq!(mode.apply(2.5), 2);
        assert_eq!(mode.apply(-1.5), -2);
        assert_eq!(mode.apply(-2.5), -2);
    }

    #[test]
    fn test_half_even_non_ties() {
        let mode = RoundingMode::HalfEven;
        assert_eq!(mode.apply(2.4), 2);
        assert_eq!(mode.apply(2.6), 3);
        assert_eq!(mode.apply(-2.6), -3);
    }

    #[test]
    fn test_half_up() {
        let mode = RoundingMode::HalfUp;
        assert_eq!(mode.apply(0.5), 1);
        assert_eq!(mode.apply(2.5), 3);
        assert_eq!(mode.apply(-2.5), -2);
    }

    #[test]
    fn test_down_and_up() {
        assert_eq!(RoundingMode::Down.apply(2.9), 2);
        assert_eq!(RoundingMode::Down.apply(-2.9), -2);
        assert_eq!(RoundingMode::Up.apply(2.1), 3);
        assert_eq!(RoundingMode::Up.apply(-2.1), -3);
    }

    #[test]
    fn test_half_down() {
        let mode = RoundingMode::HalfDown;
        assert_eq!(mode.apply(2.5), 2);
        assert_eq!(mode.apply(2.6), 3);
        assert_eq!(mode.apply(-2.5), -2);
    }
}

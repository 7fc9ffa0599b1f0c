//! Fixed-quota allocation helper
//!
//! For distributions that mix fixed quotas with a residual: allocate the
//! fixed parts, then finalize. Any unallocated remainder is folded into the
//! last part so the parts always sum to the original total.

use crate::{Money, Result};

/// Builder for allocations with fixed quotas
#[derive(Debug, Clone)]
pub struct Allocation {
    total: Money,
    allocated: Money,
    parts: Vec<Money>,
}

impl Allocation {
    /// Start an allocation over a total amount
    pub fn new(total: Money) -> Self {
        Self {
            total,
            allocated: Money::zero(total.currency()),
            parts: Vec::new(),
        }
    }

    /// Allocate a fixed quota; fails across currencies or on overflow
    pub fn fixed(&mut self, amount: Money) -> Result<&mut Self> {
        self.allocated = self.allocated.checked_add(amount)?;
        self.parts.push(amount);
        Ok(self)
    }

    /// Remainder not yet allocated (may be negative if over-allocated)
    pub fn remainder(&self) -> Result<Money> {
        self.total.checked_sub(self.allocated)
    }

    /// Finalize: fold any residual into the last part so that the parts sum
    /// exactly to the total
    pub fn finalize(mut self) -> Result<Vec<Money>> {
        let remainder = self.remainder()?;
        if !remainder.is_zero() {
            match self.parts.last_mut() {
                Some(last) => *last = last.checked_add(remainder)?,
                None => self.parts.push(remainder),
            }
        }
        Ok(self.parts)
    }
}

//! Qualification policies
//!
//! A policy is declarative data: a confidence floor, an amount ceiling, and
//! a human-approval threshold. One policy is reused across many gate
//! evaluations and never mutated. No executable code is ever accepted as
//! policy input.

use crate::{Error, Result};
use money_core::Money;
use serde::{Deserialize, Serialize};

/// Declarative thresholds for admitting automated monetary decisions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationPolicy {
    /// Minimum confidence for admission, in `[0, 1]`
    pub min_confidence: f64,
    /// Hard ceiling; amounts above this are rejected
    pub max_amount: Money,
    /// Amounts above this are admitted but flagged for human approval
    pub require_human_approval_above: Money,
    /// Policy name, recorded in decisions
    pub name: String,
    /// Policy version, recorded in decisions
    pub version: String,
}

impl QualificationPolicy {
    /// Create a validated policy.
    ///
    /// Fails if the confidence floor is outside `[0, 1]` or the two Money
    /// bounds carry different currencies (a policy evaluates exactly one
    /// currency).
    pub fn new(
        min_confidence: f64,
        max_amount: Money,
        require_human_approval_above: Money,
    ) -> Result<Self> {
        if !min_confidence.is_finite() || !(0.0..=1.0).contains(&min_confidence) {
            return Err(Error::InvalidArgument(format!(
                "min_confidence must be in [0, 1], got {}",
                min_confidence
            )));
        }
        if max_amount.currency() != require_human_approval_above.currency() {
            return Err(Error::Money(money_core::Error::CurrencyMismatch {
                expected: max_amount.currency().code(),
                actual: require_human_approval_above.currency().code(),
            }));
        }
        Ok(Self {
            min_confidence,
            max_amount,
            require_human_approval_above,
            name: "default".to_string(),
            version: "policy-v1".to_string(),
        })
    }

    /// Set the policy name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the policy version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

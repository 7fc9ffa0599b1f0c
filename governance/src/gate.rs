//! The admission gate
//!
//! Pure, deterministic evaluation of a transaction against a policy.
//! Checks run in strict precedence order and the first failing check wins;
//! the decision carries exactly one reason.

use crate::{QualificationPolicy, SignedTransaction};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Outcome of one gate evaluation; produced fresh, never mutated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Whether the transaction was admitted
    pub admitted: bool,
    /// Reason for rejection, or empty when admitted
    pub reason: String,
    /// Admitted amounts above the policy threshold still need a human
    pub requires_human_approval: bool,
    /// Version of the policy that produced this decision
    pub policy_version: String,
}

/// Evaluates transactions against one policy
#[derive(Debug, Clone)]
pub struct Gate {
    policy: QualificationPolicy,
}

impl Gate {
    /// Create a gate for a policy
    pub fn new(policy: QualificationPolicy) -> Self {
        Self { policy }
    }

    /// The policy this gate enforces
    pub fn policy(&self) -> &QualificationPolicy {
        &self.policy
    }

    /// Evaluate a transaction.
    ///
    /// Check order is fixed: confidence floor, currency compatibility,
    /// amount ceiling, human-approval threshold. A pure function of
    /// (transaction, policy) with no side effects beyond a debug log.
    pub fn evaluate(&self, tx: &SignedTransaction) -> Decision {
        let decision = self.decide(tx);
        tracing::debug!(
            tx_id = %tx.tx_id(),
            admitted = decision.admitted,
            requires_human_approval = decision.requires_human_approval,
            reason = %decision.reason,
            "gate evaluation"
        );
        decision
    }

    fn decide(&self, tx: &SignedTransaction) -> Decision {
        if tx.confidence() < self.policy.min_confidence {
            return self.rejection("confidence below threshold");
        }

        if tx.amount().currency() != self.policy.max_amount.currency() {
            return self.rejection("currency mismatch");
        }

        // Same currency from here on; ordering cannot fail
        if tx.amount().partial_cmp(&self.policy.max_amount) == Some(Ordering::Greater) {
            return self.rejection("amount exceeds policy maximum");
        }

        let requires_human_approval = tx
            .amount()
            .partial_cmp(&self.policy.require_human_approval_above)
            == Some(Ordering::Greater);

        Decision {
            admitted: true,
            reason: String::new(),
            requires_human_approval,
            policy_version: self.policy.version.clone(),
        }
    }

    fn rejection(&self, reason: &str) -> Decision {
        Decision {
            admitted: false,
            reason: reason.to_string(),
            requires_human_approval: false,
            policy_version: self.policy.version.clone(),
        }
    }
}

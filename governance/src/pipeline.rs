//! The qualification pipeline
//!
//! One call takes an AI-proposed amount through the whole governed path:
//! construct, sign, gate, admit or reject, and append to the ledger. Both
//! outcomes are recorded; a rejection is audit material too.

use crate::{Decision, Gate, Ledger, Result, SignedTransaction};
use money_core::Money;

/// Qualify an AI-proposed amount and record the outcome.
///
/// Returns the transaction in its terminal state (Admitted or Rejected)
/// together with the gate's decision. The ledger entry is appended before
/// returning, so the audit trail never misses an evaluation.
pub fn qualify(
    amount: Money,
    source: impl Into<String>,
    confidence: f64,
    rationale: impl Into<String>,
    gate: &Gate,
    ledger: &mut Ledger,
) -> Result<(SignedTransaction, Decision)> {
    let tx = SignedTransaction::from_ai_output(amount, source, confidence, rationale)?.sign()?;
    let decision = gate.evaluate(&tx);

    let tx = if decision.admitted {
        tx.admit()?
    } else {
        tx.reject(decision.reason.clone())?
    };

    tracing::info!(
        tx_id = %tx.tx_id(),
        admitted = decision.admitted,
        requires_human_approval = decision.requires_human_approval,
        "transaction qualified"
    );

    ledger.append(tx.clone(), decision.clone())?;
    Ok((tx, decision))
}

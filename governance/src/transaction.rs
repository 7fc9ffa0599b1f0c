//! Signed transaction records with a one-directional lifecycle
//!
//! A transaction starts Pending, is signed exactly once, and then is either
//! admitted or rejected. Transitions consume the value and return the next
//! state, so no code path can move a record backwards or re-sign it. The
//! signature is a SHA-256 digest over the canonical content; verification
//! recomputes it and compares in constant time.

use crate::{crypto, Digest, Error, Result};
use chrono::{DateTime, Utc};
use money_core::{Money, MoneyRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state: Pending → Signed → {Admitted | Rejected}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionState {
    /// Created, not yet signed; content may still be recomputed
    Pending,
    /// Content digest computed; covered fields are frozen
    Signed,
    /// Passed the gate
    Admitted,
    /// Rejected by the gate (or downstream), with the reason
    Rejected {
        /// Why the transaction was rejected
        reason: String,
    },
}

impl TransactionState {
    fn name(&self) -> &'static str {
        match self {
            TransactionState::Pending => "pending",
            TransactionState::Signed => "signed",
            TransactionState::Admitted => "admitted",
            TransactionState::Rejected { .. } => "rejected",
        }
    }
}

/// A monetary decision with provenance and a tamper-evident signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    tx_id: Uuid,
    amount: Money,
    source: String,
    confidence: f64,
    rationale: String,
    timestamp: DateTime<Utc>,
    state: TransactionState,
    signature: Option<Digest>,
}

/// Canonical content covered by the signature. Field order is the hash
/// contract; the timestamp hashes as integer microseconds.
#[derive(Serialize)]
struct CanonicalContent<'a> {
    tx_id: String,
    amount: MoneyRecord,
    source: &'a str,
    confidence: f64,
    rationale: &'a str,
    timestamp_micros: i64,
}

impl SignedTransaction {
    /// Create a Pending transaction from AI-generated output.
    ///
    /// Fails with `InvalidArgument` unless confidence is a finite value in
    /// `[0, 1]`.
    pub fn from_ai_output(
        amount: Money,
        source: impl Into<String>,
        confidence: f64,
        rationale: impl Into<String>,
    ) -> Result<Self> {
        if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidArgument(format!(
                "confidence must be in [0, 1], got {}",
                confidence
            )));
        }
        Ok(Self {
            tx_id: Uuid::new_v4(),
            amount,
            source: source.into(),
            confidence,
            rationale: rationale.into(),
            timestamp: Utc::now(),
            state: TransactionState::Pending,
            signature: None,
        })
    }

    /// Create a Pending transaction from human input (confidence 1.0)
    pub fn from_human(
        amount: Money,
        source: impl Into<String>,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            tx_id: Uuid::new_v4(),
            amount,
            source: source.into(),
            confidence: 1.0,
            rationale: rationale.into(),
            timestamp: Utc::now(),
            state: TransactionState::Pending,
            signature: None,
        }
    }

    fn canonical_content(&self) -> CanonicalContent<'_> {
        CanonicalContent {
            tx_id: self.tx_id.to_string(),
            amount: self.amount.to_record(),
            source: &self.source,
            confidence: self.confidence,
            rationale: &self.rationale,
            timestamp_micros: self.timestamp.timestamp_micros(),
        }
    }

    /// Compute the content digest and transition Pending → Signed.
    ///
    /// Fails with `InvalidState` if already signed or beyond; a signature
    /// is computed exactly once per record.
    pub fn sign(mut self) -> Result<Self> {
        if self.state != TransactionState::Pending {
            return Err(Error::InvalidState {
                from: self.state.name(),
                attempted: "sign",
            });
        }
        let digest = crypto::hash_canonical(&self.canonical_content())?;
        self.signature = Some(digest);
        self.state = TransactionState::Signed;
        Ok(self)
    }

    /// Transition Signed → Admitted
    pub fn admit(mut self) -> Result<Self> {
        if self.state != TransactionState::Signed {
            return Err(Error::InvalidState {
                from: self.state.name(),
                attempted: "admit",
            });
        }
        self.state = TransactionState::Admitted;
        Ok(self)
    }

    /// Transition Signed → Rejected with a reason
    pub fn reject(mut self, reason: impl Into<String>) -> Result<Self> {
        if self.state != TransactionState::Signed {
            return Err(Error::InvalidState {
                from: self.state.name(),
                attempted: "reject",
            });
        }
        self.state = TransactionState::Rejected {
            reason: reason.into(),
        };
        Ok(self)
    }

    /// Recompute the content digest and compare to the stored signature in
    /// constant time. False for unsigned records.
    pub fn verify_signature(&self) -> bool {
        let Some(stored) = self.signature else {
            return false;
        };
        match crypto::hash_canonical(&self.canonical_content()) {
            Ok(expected) => stored.ct_eq(&expected),
            Err(_) => false,
        }
    }

    /// Transaction id
    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    /// Monetary amount
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Origin of the amount (model name, system, human)
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Confidence in `[0, 1]`
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Why this amount was proposed
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    /// Creation timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Current lifecycle state
    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    /// Content digest, if signed
    pub fn signature(&self) -> Option<Digest> {
        self.signature
    }
}

impl fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {} {} from {} ({})",
            self.tx_id,
            self.amount,
            self.source,
            self.state.name()
        )
    }
}

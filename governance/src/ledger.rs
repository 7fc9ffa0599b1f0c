//! Append-only hash-chained audit ledger
//!
//! Every transaction-plus-decision pair becomes an entry whose hash covers
//! its full content, including the previous entry's hash. Editing any
//! historical field breaks either that entry's own hash or the chain link
//! in the next one, so [`Ledger::verify_chain`] is the sole and sufficient
//! tamper-detection mechanism.
//!
//! The ledger is an in-memory structure; durable storage is an external
//! concern. `append` takes `&mut self`, so the borrow checker enforces the
//! single-writer model: callers driving concurrent workloads serialize
//! appends behind a mutex or a dedicated writer task.

use crate::{crypto, Decision, Digest, Error, GovernanceConfig, Result, SignedTransaction};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default maximum entry count (resource bound)
pub const DEFAULT_MAX_ENTRIES: usize = 1_000_000;

/// One append-only record: a transaction, the decision about it, and the
/// hashes that chain it to its predecessor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Position in the chain, starting at 0
    pub sequence: u64,
    /// The governed transaction
    pub transaction: SignedTransaction,
    /// The gate's decision
    pub decision: Decision,
    /// Hash of the predecessor entry (genesis digest for entry 0)
    pub previous_hash: Digest,
    /// Hash of this entry's full content, including `previous_hash`
    pub entry_hash: Digest,
}

/// Canonical view hashed into `entry_hash`. Field order is the contract.
#[derive(Serialize)]
struct CanonicalEntry<'a> {
    sequence: u64,
    transaction: &'a SignedTransaction,
    decision: &'a Decision,
    previous_hash: String,
}

fn entry_digest(
    sequence: u64,
    transaction: &SignedTransaction,
    decision: &Decision,
    previous_hash: &Digest,
) -> Result<Digest> {
    crypto::hash_canonical(&CanonicalEntry {
        sequence,
        transaction,
        decision,
        previous_hash: previous_hash.to_hex(),
    })
}

/// Result of a chain verification walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainVerification {
    /// Every link and every entry hash checked out
    Valid,
    /// First entry whose link or content hash failed
    TamperedAt {
        /// Sequence number of the first offending entry
        sequence: u64,
    },
}

impl ChainVerification {
    /// True when the whole chain verified
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainVerification::Valid)
    }
}

/// Append-only, hash-chained, bounded audit ledger
#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    max_entries: usize,
}

impl Ledger {
    /// Create an empty ledger with the default capacity
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create an empty ledger with an explicit capacity bound
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    /// Create an empty ledger from configuration
    pub fn with_config(config: &GovernanceConfig) -> Self {
        Self::with_max_entries(config.max_ledger_entries)
    }

    /// Rebuild a ledger from exported entries, e.g. to re-verify an audit
    /// trail out of band. The entries are taken as-is; call
    /// [`Ledger::verify_chain`] to authenticate them.
    pub fn from_export(entries: Vec<LedgerEntry>, max_entries: usize) -> Self {
        Self {
            entries,
            max_entries,
        }
    }

    /// Append a transaction and its decision.
    ///
    /// Computes the chain link and entry hash; fails with
    /// `CapacityExceeded` once the configured maximum is reached.
    pub fn append(
        &mut self,
        transaction: SignedTransaction,
        decision: Decision,
    ) -> Result<&LedgerEntry> {
        if self.entries.len() >= self.max_entries {
            return Err(Error::CapacityExceeded {
                max: self.max_entries,
            });
        }

        let sequence = self.entries.len() as u64;
        let previous_hash = match self.entries.last() {
            Some(prev) => prev.entry_hash,
            None => Digest::GENESIS,
        };
        let entry_hash = entry_digest(sequence, &transaction, &decision, &previous_hash)?;

        tracing::debug!(
            sequence,
            tx_id = %transaction.tx_id(),
            admitted = decision.admitted,
            entry_hash = %entry_hash,
            "ledger append"
        );

        self.entries.push(LedgerEntry {
            sequence,
            transaction,
            decision,
            previous_hash,
            entry_hash,
        });
        Ok(self.entries.last().expect("entry was just pushed"))
    }

    /// Walk the chain and verify every link and every entry hash.
    ///
    /// All digest comparisons are constant-time. Returns the sequence
    /// number of the first offending entry on failure.
    pub fn verify_chain(&self) -> ChainVerification {
        for (i, entry) in self.entries.iter().enumerate() {
            let expected_previous = if i == 0 {
                Digest::GENESIS
            } else {
                self.entries[i - 1].entry_hash
            };

            if !entry.previous_hash.ct_eq(&expected_previous) {
                tracing::warn!(sequence = i as u64, "broken chain link");
                return ChainVerification::TamperedAt { sequence: i as u64 };
            }

            let recomputed = entry_digest(
                entry.sequence,
                &entry.transaction,
                &entry.decision,
                &entry.previous_hash,
            );
            let intact = match recomputed {
                Ok(digest) => entry.entry_hash.ct_eq(&digest),
                Err(_) => false,
            };
            if !intact {
                tracing::warn!(sequence = i as u64, "entry hash mismatch");
                return ChainVerification::TamperedAt { sequence: i as u64 };
            }
        }
        ChainVerification::Valid
    }

    /// Read-only ordered snapshot for analytics; never mutates the ledger
    pub fn to_export(&self) -> Vec<LedgerEntry> {
        self.entries.clone()
    }

    /// Export the full trail as JSON for audit consumption
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Find the entry recording a transaction id
    pub fn find_by_tx_id(&self, tx_id: Uuid) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.transaction.tx_id() == tx_id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry has been appended
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured maximum entry count
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gate, QualificationPolicy};
    use money_core::Money;

    fn gate() -> Gate {
        Gate::new(
            QualificationPolicy::new(
                0.85,
                Money::eur_cents(1_000_000),
                Money::eur_cents(500_000),
            )
            .unwrap(),
        )
    }

    fn signed_tx(cents: i128) -> SignedTransaction {
        SignedTransaction::from_ai_output(Money::eur_cents(cents), "model-x", 0.9, "test")
            .unwrap()
            .sign()
            .unwrap()
    }

    fn filled_ledger(n: usize) -> Ledger {
        let g = gate();
        let mut ledger = Ledger::new();
        for i in 0..n {
            let tx = signed_tx(1_000 + i as i128);
            let decision = g.evaluate(&tx);
            let tx = tx.admit().unwrap();
            ledger.append(tx, decision).unwrap();
        }
        ledger
    }

    #[test]
    fn test_genesis_link() {
        let ledger = filled_ledger(1);
        let export = ledger.to_export();
        assert_eq!(export[0].sequence, 0);
        assert_eq!(export[0].previous_hash, Digest::GENESIS);
    }

    #[test]
    fn test_links_connect() {
        let ledger = filled_ledger(3);
        let export = ledger.to_export();
        for i in 1..export.len() {
            assert_eq!(export[i].previous_hash, export[i - 1].entry_hash);
        }
    }

    #[test]
    fn test_verify_valid_chain() {
        assert!(filled_ledger(5).verify_chain().is_valid());
        assert!(Ledger::new().verify_chain().is_valid());
    }

    #[test]
    fn test_capacity_bound() {
        let g = gate();
        let mut ledger = Ledger::with_max_entries(2);
        for _ in 0..2 {
            let tx = signed_tx(100);
            let decision = g.evaluate(&tx);
            ledger.append(tx.admit().unwrap(), decision).unwrap();
        }
        let tx = signed_tx(100);
        let decision = g.evaluate(&tx);
        let err = ledger.append(tx.admit().unwrap(), decision).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { max: 2 }));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_find_by_tx_id() {
        let g = gate();
        let mut ledger = Ledger::new();
        let tx = signed_tx(777);
        let id = tx.tx_id();
        let decision = g.evaluate(&tx);
        ledger.append(tx.admit().unwrap(), decision).unwrap();

        assert!(ledger.find_by_tx_id(id).is_some());
        assert!(ledger.find_by_tx_id(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_tampered_decision_detected() {
        let ledger = filled_ledger(4);
        let mut entries = ledger.to_export();
        entries[2].decision.admitted = false;

        let tampered = Ledger::from_export(entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(
            tampered.verify_chain(),
            ChainVerification::TamperedAt { sequence: 2 }
        );
    }

    #[test]
    fn test_tampered_sequence_detected() {
        // The report names the chain position, not the forged field value
        let ledger = filled_ledger(3);
        let mut entries = ledger.to_export();
        entries[1].sequence = 9;

        let tampered = Ledger::from_export(entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(
            tampered.verify_chain(),
            ChainVerification::TamperedAt { sequence: 1 }
        );
    }

    #[test]
    fn test_rewritten_entry_hash_breaks_next_link() {
        // Recompute a forged entry hash so the entry itself verifies; the
        // following entry's previous_hash then exposes the rewrite
        let ledger = filled_ledger(3);
        let mut entries = ledger.to_export();
        entries[1].decision.reason = "forged".to_string();
        entries[1].entry_hash = entry_digest(
            entries[1].sequence,
            &entries[1].transaction,
            &entries[1].decision,
            &entries[1].previous_hash,
        )
        .unwrap();

        let tampered = Ledger::from_export(entries, DEFAULT_MAX_ENTRIES);
        assert_eq!(
            tampered.verify_chain(),
            ChainVerification::TamperedAt { sequence: 2 }
        );
    }

    #[test]
    fn test_json_export_parses_back() {
        let ledger = filled_ledger(2);
        let json = ledger.to_json().unwrap();
        let entries: Vec<LedgerEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries, ledger.to_export());
    }
}

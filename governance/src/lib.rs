//! Provenance Rail Governance
//!
//! Admission, rejection, and tamper-evident audit of automated monetary
//! decisions. AI-originated amounts become [`SignedTransaction`] records,
//! the [`Gate`] judges them against a [`QualificationPolicy`], and every
//! transaction-plus-decision pair lands in an append-only, hash-chained
//! [`Ledger`].
//!
//! # Invariants
//!
//! - Transaction lifecycle is one-directional: Pending → Signed →
//!   {Admitted | Rejected}, never back
//! - A signature covers the full content and any covered-field change
//!   invalidates it
//! - Every ledger entry hash-chains to its predecessor; a single-bit edit
//!   of history is detectable
//! - Hash comparisons during verification are constant-time

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod config;
pub mod crypto;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod pipeline;
pub mod policy;
pub mod transaction;

// Re-exports
pub use config::{GovernanceConfig, PolicyConfig};
pub use crypto::Digest;
pub use error::{Error, Result};
pub use gate::{Decision, Gate};
pub use ledger::{ChainVerification, Ledger, LedgerEntry};
pub use pipeline::qualify;
pub use policy::QualificationPolicy;
pub use transaction::{SignedTransaction, TransactionState};

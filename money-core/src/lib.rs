//! Provenance Rail Money Core
//!
//! Exact, currency-aware monetary values in integer minor units.
//!
//! # Invariants
//!
//! - Minor units are always integers: no fractional cent ever exists
//! - Every arithmetic result carries exactly one currency
//! - `distribute(n)` and `distribute_weighted(w)` preserve the sum exactly
//! - Rounding happens at most once per operation, with an explicit mode

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod allocation;
pub mod currency;
pub mod error;
pub mod money;
pub mod rounding;

// Re-exports
pub use allocation::Allocation;
pub use currency::Currency;
pub use error::{Error, Result};
pub use money::{Money, MoneyRecord, MAX_DISTRIBUTION_PARTS};
pub use rounding::RoundingMode;

//! The Money value type
//!
//! A `Money` is an integer amount of minor units (cents, pence, satoshi)
//! bound to one currency. All arithmetic is checked i128 arithmetic; no
//! floating point ever appears inside a stored amount or on the wire.
//!
//! Float-derived operations (VAT, discounts, weighted distribution) use one
//! f64 intermediate and round exactly once. They are exact while the
//! intermediate stays within f64's integer-exact range (2^53 minor units);
//! beyond that a caller should not be deriving amounts from floats at all.

use crate::{Currency, Error, Result, RoundingMode};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of parts for any distribution (resource bound)
pub const MAX_DISTRIBUTION_PARTS: usize = 10_000;

/// Largest float magnitude that converts to minor units without losing
/// integer precision (2^53).
const FLOAT_EXACT_BOUND: f64 = 9_007_199_254_740_992.0;

/// Immutable monetary value in integer minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    minor_units: i128,
    currency: Currency,
}

/// Wire form of a [`Money`]: integers and a currency code, never a float
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyRecord {
    /// Amount in minor units
    pub minor_units: i128,
    /// ISO 4217 currency code
    pub currency: String,
}

impl Money {
    // -------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------

    /// Create from whole major units (euros, dollars). Checked: fails on
    /// i128 overflow of the minor-unit conversion.
    pub fn from_major(major_units: i128, currency: Currency) -> Result<Self> {
        let minor_units = major_units
            .checked_mul(currency.multiplier())
            .ok_or_else(|| {
                Error::Overflow(format!(
                    "{} major units of {} overflow minor-unit range",
                    major_units, currency
                ))
            })?;
        Ok(Self {
            minor_units,
            currency,
        })
    }

    /// Create directly from minor units. No conversion, maximum precision.
    pub fn from_minor(minor_units: i128, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Create from a float, rounding half-to-even.
    ///
    /// The one sanctioned float entry point: precision loss is possible and
    /// is the caller's responsibility. Rounding happens here, once; from
    /// this point on everything is an integer. Fails with `PrecisionLoss`
    /// on non-finite input or magnitudes beyond the f64 integer-exact range.
    pub fn from_float(value: f64, currency: Currency) -> Result<Self> {
        Self::from_float_with(value, currency, RoundingMode::default())
    }

    /// [`Money::from_float`] with an explicit rounding mode
    pub fn from_float_with(value: f64, currency: Currency, rounding: RoundingMode) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::PrecisionLoss(format!(
                "cannot convert non-finite value {} to {}",
                value, currency
            )));
        }
        let minor_float = value * currency.multiplier() as f64;
        if minor_float.abs() >= FLOAT_EXACT_BOUND {
            return Err(Error::PrecisionLoss(format!(
                "{} {} exceeds the exactly-representable float range",
                value, currency
            )));
        }
        Ok(Self {
            minor_units: rounding.apply(minor_float),
            currency,
        })
    }

    /// Zero in the given currency, useful as a fold seed
    pub fn zero(currency: Currency) -> Self {
        Self::from_minor(0, currency)
    }

    /// Whole euros
    pub fn eur(major_units: i128) -> Result<Self> {
        Self::from_major(major_units, Currency::EUR)
    }

    /// Euro cents
    pub fn eur_cents(cents: i128) -> Self {
        Self::from_minor(cents, Currency::EUR)
    }

    /// Whole US dollars
    pub fn usd(major_units: i128) -> Result<Self> {
        Self::from_major(major_units, Currency::USD)
    }

    /// US cents
    pub fn usd_cents(cents: i128) -> Self {
        Self::from_minor(cents, Currency::USD)
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Amount in minor units
    pub fn minor_units(&self) -> i128 {
        self.minor_units
    }

    /// Currency of this amount
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// True if strictly positive
    pub fn is_positive(&self) -> bool {
        self.minor_units > 0
    }

    /// True if strictly negative
    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// True if zero
    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    // -------------------------------------------------------------------
    // Checked arithmetic
    // -------------------------------------------------------------------

    fn check_same_currency(&self, other: &Self) -> Result<()> {
        if self.currency != other.currency {
            return Err(Error::CurrencyMismatch {
                expected: self.currency.code(),
                actual: other.currency.code(),
            });
        }
        Ok(())
    }

    /// Checked addition; currencies must match
    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.check_same_currency(&other)?;
        let minor_units = self
            .minor_units
            .checked_add(other.minor_units)
            .ok_or_else(|| Error::Overflow(format!("{} + {}", self, other)))?;
        Ok(Self {
            minor_units,
            currency: self.currency,
        })
    }

    /// Checked subtraction; currencies must match
    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.check_same_currency(&other)?;
        let minor_units = self
            .minor_units
            .checked_sub(other.minor_units)
            .ok_or_else(|| Error::Overflow(format!("{} - {}", self, other)))?;
        Ok(Self {
            minor_units,
            currency: self.currency,
        })
    }

    /// Checked multiplication by an integer scalar (quantity scaling).
    ///
    /// Exact, no rounding. Real-valued scaling must go through
    /// [`Money::apply_percentage`] or the VAT/discount operations.
    pub fn checked_mul(self, scalar: i128) -> Result<Self> {
        let minor_units = self
            .minor_units
            .checked_mul(scalar)
            .ok_or_else(|| Error::Overflow(format!("{} * {}", self, scalar)))?;
        Ok(Self {
            minor_units,
            currency: self.currency,
        })
    }

    /// Negated amount
    pub fn neg(self) -> Self {
        Self {
            minor_units: -self.minor_units,
            currency: self.currency,
        }
    }

    /// Absolute amount
    pub fn abs(self) -> Self {
        Self {
            minor_units: self.minor_units.abs(),
            currency: self.currency,
        }
    }

    /// Three-way comparison; fails with `CurrencyMismatch` across currencies
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        self.check_same_currency(other)?;
        Ok(self.minor_units.cmp(&other.minor_units))
    }

    // -------------------------------------------------------------------
    // Distribution
    // -------------------------------------------------------------------

    /// Split into `n` parts whose sum is exactly `self`.
    ///
    /// Largest remainder method: with `base = minor_units div n` and
    /// `r = minor_units mod n` (floor division, so `r` is in `[0, n)` even
    /// for negative amounts), the first `r` parts get `base + 1` and the
    /// rest get `base`. Then `r*(base+1) + (n-r)*base = n*base + r =
    /// minor_units` by the division identity, so the sum is preserved for
    /// every input and every part differs from every other by at most one
    /// minor unit.
    pub fn distribute(&self, n: usize) -> Result<Vec<Money>> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "distribution part count must be positive".to_string(),
            ));
        }
        if n > MAX_DISTRIBUTION_PARTS {
            return Err(Error::InvalidArgument(format!(
                "distribution part count {} exceeds maximum {}",
                n, MAX_DISTRIBUTION_PARTS
            )));
        }

        let n_i = n as i128;
        let base = self.minor_units.div_euclid(n_i);
        let remainder = self.minor_units.rem_euclid(n_i) as usize;

        let parts = (0..n)
            .map(|i| {
                let units = if i < remainder { base + 1 } else { base };
                Money::from_minor(units, self.currency)
            })
            .collect();
        Ok(parts)
    }

    /// Split proportionally to `weights`, preserving the sum exactly.
    ///
    /// Each raw share is rounded half-to-even; the residual between the
    /// rounded sum and the original amount is added entirely to the share
    /// with the largest weight (lowest index on ties).
    pub fn distribute_weighted(&self, weights: &[f64]) -> Result<Vec<Money>> {
        self.distribute_weighted_with(weights, RoundingMode::default())
    }

    /// [`Money::distribute_weighted`] with an explicit rounding mode
    pub fn distribute_weighted_with(
        &self,
        weights: &[f64],
        rounding: RoundingMode,
    ) -> Result<Vec<Money>> {
        if weights.is_empty() {
            return Err(Error::InvalidArgument(
                "weight vector must not be empty".to_string(),
            ));
        }
        if weights.len() > MAX_DISTRIBUTION_PARTS {
            return Err(Error::InvalidArgument(format!(
                "weight vector length {} exceeds maximum {}",
                weights.len(),
                MAX_DISTRIBUTION_PARTS
            )));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidArgument(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        let total_weight: f64 = weights.iter().sum();
        if total_weight <= 0.0 {
            return Err(Error::InvalidArgument(
                "weights must not sum to zero".to_string(),
            ));
        }

        let mut shares: Vec<i128> = weights
            .iter()
            .map(|w| rounding.apply(self.minor_units as f64 * (w / total_weight)))
            .collect();

        let rounded_sum: i128 = shares.iter().sum();
        let diff = self.minor_units - rounded_sum;
        if diff != 0 {
            // Strict > keeps the lowest index on equal weights
            let max_idx = weights
                .iter()
                .enumerate()
                .fold(0usize, |best, (i, w)| {
                    if *w > weights[best] {
                        i
                    } else {
                        best
                    }
                });
            shares[max_idx] += diff;
            tracing::debug!(
                residual = %diff,
                adjusted_index = max_idx,
                "weighted distribution residual folded into largest share"
            );
        }

        Ok(shares
            .into_iter()
            .map(|units| Money::from_minor(units, self.currency))
            .collect())
    }

    // -------------------------------------------------------------------
    // Fiscal operations
    // -------------------------------------------------------------------

    fn check_rate(rate_percent: f64) -> Result<()> {
        if !rate_percent.is_finite() || rate_percent < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "rate must be a finite non-negative percentage, got {}",
                rate_percent
            )));
        }
        Ok(())
    }

    /// Add VAT on top of this net amount.
    ///
    /// Returns `(net, vat, gross)` where `gross` is computed as `net + vat`,
    /// so `net + vat == gross` holds by construction.
    pub fn add_vat(&self, rate_percent: f64) -> Result<(Money, Money, Money)> {
        self.add_vat_with(rate_percent, RoundingMode::default())
    }

    /// [`Money::add_vat`] with an explicit rounding mode
    pub fn add_vat_with(
        &self,
        rate_percent: f64,
        rounding: RoundingMode,
    ) -> Result<(Money, Money, Money)> {
        Self::check_rate(rate_percent)?;
        let vat_minor = rounding.apply(self.minor_units as f64 * (rate_percent / 100.0));
        let vat = Money::from_minor(vat_minor, self.currency);
        let gross = self.checked_add(vat)?;
        Ok((*self, vat, gross))
    }

    /// Extract VAT from this gross amount.
    ///
    /// `net = round(gross / (1 + rate/100))`, and the VAT is computed by
    /// difference so `net + vat == gross` holds by construction.
    pub fn extract_vat(&self, rate_percent: f64) -> Result<(Money, Money, Money)> {
        self.extract_vat_with(rate_percent, RoundingMode::default())
    }

    /// [`Money::extract_vat`] with an explicit rounding mode
    pub fn extract_vat_with(
        &self,
        rate_percent: f64,
        rounding: RoundingMode,
    ) -> Result<(Money, Money, Money)> {
        Self::check_rate(rate_percent)?;
        let net_minor = rounding.apply(self.minor_units as f64 / (1.0 + rate_percent / 100.0));
        let net = Money::from_minor(net_minor, self.currency);
        let vat = self.checked_sub(net)?;
        Ok((net, vat, *self))
    }

    /// Apply a percentage discount.
    ///
    /// Returns `(discount, discounted_price)` with the discounted price
    /// computed by difference, so `discount + discounted_price == self`.
    pub fn apply_discount(&self, percent: f64) -> Result<(Money, Money)> {
        self.apply_discount_with(percent, RoundingMode::default())
    }

    /// [`Money::apply_discount`] with an explicit rounding mode
    pub fn apply_discount_with(
        &self,
        percent: f64,
        rounding: RoundingMode,
    ) -> Result<(Money, Money)> {
        Self::check_rate(percent)?;
        let discount_minor = rounding.apply(self.minor_units as f64 * (percent / 100.0));
        let discount = Money::from_minor(discount_minor, self.currency);
        let discounted = self.checked_sub(discount)?;
        Ok((discount, discounted))
    }

    /// Scale by a percentage, rounding once.
    ///
    /// The sanctioned path for real-valued scaling; plain float multiplication
    /// of Money does not exist.
    pub fn apply_percentage(&self, percent: f64) -> Result<Money> {
        self.apply_percentage_with(percent, RoundingMode::default())
    }

    /// [`Money::apply_percentage`] with an explicit rounding mode
    pub fn apply_percentage_with(&self, percent: f64, rounding: RoundingMode) -> Result<Money> {
        Self::check_rate(percent)?;
        let minor = rounding.apply(self.minor_units as f64 * (percent / 100.0));
        Ok(Money::from_minor(minor, self.currency))
    }

    // -------------------------------------------------------------------
    // Wire form
    // -------------------------------------------------------------------

    /// Serialize to the integer wire record
    pub fn to_record(&self) -> MoneyRecord {
        MoneyRecord {
            minor_units: self.minor_units,
            currency: self.currency.code().to_string(),
        }
    }

    /// Reconstruct from a wire record; exact round trip
    pub fn from_record(record: &MoneyRecord) -> Result<Self> {
        let currency = Currency::from_code(&record.currency).ok_or_else(|| {
            Error::InvalidArgument(format!("unknown currency code: {}", record.currency))
        })?;
        Ok(Self::from_minor(record.minor_units, currency))
    }
}

impl PartialOrd for Money {
    /// Ordering is defined only within one currency; `None` otherwise
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some(self.minor_units.cmp(&other.minor_units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let decimals = self.currency.decimals() as usize;
        if decimals == 0 {
            return write!(f, "{}{} {}", sign, abs, self.currency);
        }
        let multiplier = self.currency.multiplier() as u128;
        let major = abs / multiplier;
        let minor = abs % multiplier;
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            major,
            minor,
            self.currency,
            width = decimals
        )
    }
}

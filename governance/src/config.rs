//! Configuration for the governance layer
//!
//! Policy input is structured data only: named threshold fields with Money
//! bounds as integer minor-unit records. No executable code is ever
//! accepted as policy configuration.

use crate::{Error, QualificationPolicy, Result};
use money_core::{Money, MoneyRecord};
use serde::{Deserialize, Serialize};

/// Governance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Maximum ledger entry count (resource bound)
    pub max_ledger_entries: usize,

    /// Qualification policy thresholds
    pub policy: PolicyConfig,
}

/// Declarative policy fields as they appear in configuration files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum confidence in `[0, 1]`
    pub min_confidence: f64,

    /// Amount ceiling as an integer minor-unit record
    pub max_amount: MoneyRecord,

    /// Human-approval threshold as an integer minor-unit record
    pub require_human_approval_above: MoneyRecord,

    /// Policy name
    pub name: String,

    /// Policy version
    pub version: String,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            max_ledger_entries: crate::ledger::DEFAULT_MAX_ENTRIES,
            policy: PolicyConfig::default(),
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.85,
            max_amount: MoneyRecord {
                minor_units: 1_000_000,
                currency: "EUR".to_string(),
            },
            require_human_approval_above: MoneyRecord {
                minor_units: 500_000,
                currency: "EUR".to_string(),
            },
            name: "default".to_string(),
            version: "policy-v1".to_string(),
        }
    }
}

impl GovernanceConfig {
    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;
        let config: GovernanceConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load defaults with environment-variable overrides
    pub fn from_env() -> Result<Self> {
        let mut config = GovernanceConfig::default();

        if let Ok(max) = std::env::var("GOVERNANCE_MAX_LEDGER_ENTRIES") {
            config.max_ledger_entries = max
                .parse()
                .map_err(|e| Error::Config(format!("Invalid max ledger entries: {}", e)))?;
        }

        if let Ok(min_confidence) = std::env::var("GOVERNANCE_MIN_CONFIDENCE") {
            config.policy.min_confidence = min_confidence
                .parse()
                .map_err(|e| Error::Config(format!("Invalid min confidence: {}", e)))?;
        }

        Ok(config)
    }
}

impl PolicyConfig {
    /// Build the validated runtime policy
    pub fn to_policy(&self) -> Result<QualificationPolicy> {
        let max_amount = Money::from_record(&self.max_amount)?;
        let threshold = Money::from_record(&self.require_human_approval_above)?;
        Ok(
            QualificationPolicy::new(self.min_confidence, max_amount, threshold)?
                .with_name(self.name.clone())
                .with_version(self.version.clone()),
        )
    }
}

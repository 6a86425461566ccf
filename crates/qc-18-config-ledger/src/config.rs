//! Configuration for the Configuration Ledger Subsystem

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration ledger configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLedgerConfig {
    /// Trustee signatures required to add or edit the frozen-ledgers record
    pub trustee_signatures_required: usize,
    /// Reject writes to ledgers listed in the frozen-ledgers record
    pub enforce_frozen_ledgers: bool,
}

impl Default for ConfigLedgerConfig {
    fn default() -> Self {
        Self {
            trustee_signatures_required: 3,
            enforce_frozen_ledgers: true,
        }
    }
}

impl ConfigLedgerConfig {
    /// Defaults overridden from `QC_FREEZE_TRUSTEE_SIGS` and
    /// `QC_ENFORCE_FROZEN_LEDGERS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("QC_FREEZE_TRUSTEE_SIGS") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => self.trustee_signatures_required = n,
                _ => warn!(value = %raw, "QC_FREEZE_TRUSTEE_SIGS must be a positive integer"),
            }
        }
        if let Some(raw) = lookup("QC_ENFORCE_FROZEN_LEDGERS") {
            match raw.parse::<bool>() {
                Ok(flag) => self.enforce_frozen_ledgers = flag,
                Err(_) => warn!(value = %raw, "QC_ENFORCE_FROZEN_LEDGERS must be true or false"),
            }
        }
        self
    }
}

//! # Domain Entities for the Configuration Ledger
//!
//! ## Type Decisions
//!
//! - `ledgers_ids` is kept as the submitted `Vec<LedgerId>`: order and duplicates
//!   are whatever the transaction carried. The record is a full replace.
//! - A missing record and an empty list are different states, so reads return
//!   `Option<FrozenLedgersRecord>` rather than an empty default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::LedgerId;

/// Payload field listing the ledgers to freeze.
pub const LEDGERS_IDS: &str = "ledgers_ids";

/// A value stored in state together with the ordering metadata of the
/// transaction that last wrote it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateValue<T> {
    #[serde(rename = "val")]
    pub value: T,
    /// Sequence number of the last write.
    #[serde(rename = "lsn")]
    pub seq_no: u64,
    /// Commit time of the last write.
    #[serde(rename = "lut")]
    pub txn_time: u64,
}

impl<T> StateValue<T> {
    pub fn new(value: T, seq_no: u64, txn_time: u64) -> Self {
        Self {
            value,
            seq_no,
            txn_time,
        }
    }
}

/// The persisted frozen-ledgers record.
pub type FrozenLedgersRecord = StateValue<Vec<LedgerId>>;

impl StateValue<Vec<LedgerId>> {
    pub fn frozen_ledger_ids(&self) -> &[LedgerId] {
        &self.value
    }

    pub fn is_frozen(&self, ledger_id: LedgerId) -> bool {
        self.value.contains(&ledger_id)
    }
}

/// Typed view of a ledger-freeze transaction payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeLedgersPayload {
    pub ledgers_ids: Vec<LedgerId>,
}

impl FreezeLedgersPayload {
    /// Parse from transaction data. Fields other than `ledgers_ids` are ignored.
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(data.clone()))
    }

    /// The list written to state: the submitted ids, as submitted.
    pub fn frozen_ledgers_list(&self) -> Vec<LedgerId> {
        self.ledgers_ids.clone()
    }
}

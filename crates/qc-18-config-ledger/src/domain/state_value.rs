//! # State Value Codec
//!
//! Every value of the configuration ledger is stored as a JSON object
//! `{"lsn": <seq_no>, "lut": <txn_time>, "val": <value>}`.
//!
//! One serializer is used for both directions so that every reader of a key
//! (write handlers, read handlers, the frozen-ledger guard) decodes exactly what
//! the writer encoded.

use super::entities::StateValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::StateError;

/// Encode a value with the ordering metadata of the transaction writing it.
pub fn encode_state_value<T: Serialize>(
    key: &[u8],
    value: &T,
    seq_no: u64,
    txn_time: u64,
) -> Result<Vec<u8>, StateError> {
    let wrapped = StateValue::new(value, seq_no, txn_time);
    serde_json::to_vec(&wrapped).map_err(|e| StateError::codec(key, e))
}

/// Decode bytes previously produced by [`encode_state_value`].
pub fn decode_state_value<T: DeserializeOwned>(
    key: &[u8],
    raw: &[u8],
) -> Result<StateValue<T>, StateError> {
    serde_json::from_slice(raw).map_err(|e| StateError::codec(key, e))
}

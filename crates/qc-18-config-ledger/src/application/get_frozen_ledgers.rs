//! Frozen-Ledgers Read Handler
//!
//! Answers `GET_FROZEN_LEDGERS` from committed state.

use super::ledgers_freeze::read_frozen_ledgers;
use crate::domain::errors::RequestError;
use crate::ports::{ReadRequestHandler, ReadResult, VersionedState};
use shared_types::{Request, TxnType, GET_FROZEN_LEDGERS};
use std::sync::Arc;
use tracing::debug;

static HANDLED_TXN_TYPE: TxnType = GET_FROZEN_LEDGERS;

pub struct GetFrozenLedgersHandler<S: VersionedState> {
    state: Arc<S>,
}

impl<S: VersionedState> GetFrozenLedgersHandler<S> {
    pub fn new(state: Arc<S>) -> Self {
        Self { state }
    }
}

impl<S: VersionedState> ReadRequestHandler for GetFrozenLedgersHandler<S> {
    fn txn_type(&self) -> &TxnType {
        &HANDLED_TXN_TYPE
    }

    fn get_result(&self, request: &Request) -> Result<ReadResult, RequestError> {
        if request.txn_type() != &GET_FROZEN_LEDGERS {
            return Err(RequestError::InvalidClientRequest {
                identifier: request.identifier.clone(),
                req_id: request.req_id,
                reason: format!(
                    "Unexpected txn type {}, expected {GET_FROZEN_LEDGERS}",
                    request.txn_type()
                ),
            });
        }

        let record = read_frozen_ledgers(self.state.as_ref(), true)?;
        debug!(found = record.is_some(), "Read frozen ledgers");

        let (data, seq_no, txn_time) = match record {
            Some(record) => (
                Some(serde_json::Value::from(record.value)),
                Some(record.seq_no),
                Some(record.txn_time),
            ),
            None => (None, None, None),
        };

        Ok(ReadResult {
            txn_type: GET_FROZEN_LEDGERS,
            identifier: request.identifier.clone(),
            req_id: request.req_id,
            data,
            seq_no,
            txn_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryState;
    use crate::domain::state_keys::frozen_ledgers_state_key;
    use crate::domain::state_value::encode_state_value;
    use crate::ports::VersionedState;
    use serde_json::json;
    use shared_types::{Operation, LEDGERS_FREEZE};

    fn get_request() -> Request {
        Request::new("client1", 42, Operation::new(GET_FROZEN_LEDGERS))
    }

    fn store(state: &InMemoryState, ids: Vec<u32>, seq_no: u64, txn_time: u64) {
        let key = frozen_ledgers_state_key();
        state
            .set(key, encode_state_value(key, &ids, seq_no, txn_time).unwrap())
            .unwrap();
    }

    #[test]
    fn test_absent_record() {
        let handler = GetFrozenLedgersHandler::new(Arc::new(InMemoryState::new()));

        let result = handler.get_result(&get_request()).unwrap();

        assert_eq!(result.data, None);
        assert_eq!(result.seq_no, None);
        assert_eq!(result.req_id, 42);
    }

    #[test]
    fn test_reads_committed_record_only() {
        let state = Arc::new(InMemoryState::new());
        let handler = GetFrozenLedgersHandler::new(state.clone());

        store(&state, vec![5, 6], 10, 1_000);
        assert_eq!(handler.get_result(&get_request()).unwrap().data, None);

        state.commit().unwrap();
        let result = handler.get_result(&get_request()).unwrap();
        assert_eq!(result.data, Some(json!([5, 6])));
        assert_eq!(result.seq_no, Some(10));
        assert_eq!(result.txn_time, Some(1_000));
    }

    #[test]
    fn test_empty_record_is_reported_as_empty_list() {
        let state = Arc::new(InMemoryState::new());
        store(&state, vec![], 11, 2_000);
        state.commit().unwrap();

        let result = GetFrozenLedgersHandler::new(state)
            .get_result(&get_request())
            .unwrap();
        assert_eq!(result.data, Some(json!([])));
    }

    #[test]
    fn test_rejects_write_type() {
        let handler = GetFrozenLedgersHandler::new(Arc::new(InMemoryState::new()));
        let request = Request::new("client1", 1, Operation::new(LEDGERS_FREEZE));

        assert!(matches!(
            handler.get_result(&request),
            Err(RequestError::InvalidClientRequest { .. })
        ));
    }
}

//! Ledger-Freeze Write Handler
//!
//! Decides who may freeze ledgers and writes the frozen-ledgers record.
//!
//! The existence of a record, not its contents, selects the authorization
//! action: no record means the freeze creates configuration (`Add`), any
//! record (including an empty list) means it edits it (`Edit`).

use crate::domain::auth::AuthAction;
use crate::domain::entities::{FreezeLedgersPayload, FrozenLedgersRecord};
use crate::domain::errors::RequestError;
use crate::domain::state_keys::frozen_ledgers_state_key;
use crate::domain::state_value::{decode_state_value, encode_state_value};
use crate::ports::{VersionedState, WriteRequestHandler, WriteRequestValidator};
use shared_types::{LedgerId, Request, StateError, Txn, TxnType, CONFIG_LEDGER_ID, LEDGERS_FREEZE};
use std::sync::Arc;
use tracing::{debug, info, warn};

static HANDLED_TXN_TYPE: TxnType = LEDGERS_FREEZE;

/// Read the frozen-ledgers record from `state`.
pub fn read_frozen_ledgers<S: VersionedState + ?Sized>(
    state: &S,
    is_committed: bool,
) -> Result<Option<FrozenLedgersRecord>, StateError> {
    let key = frozen_ledgers_state_key();
    state
        .get(key, is_committed)?
        .map(|raw| decode_state_value(key, &raw))
        .transpose()
}

/// Write handler for `LEDGERS_FREEZE`.
pub struct LedgerFreezeHandler<S: VersionedState, V: WriteRequestValidator> {
    state: Arc<S>,
    write_req_validator: Arc<V>,
}

impl<S: VersionedState, V: WriteRequestValidator> LedgerFreezeHandler<S, V> {
    pub fn new(state: Arc<S>, write_req_validator: Arc<V>) -> Self {
        Self {
            state,
            write_req_validator,
        }
    }

    fn validate_request_type(&self, request: &Request) -> Result<(), RequestError> {
        if request.txn_type() != &LEDGERS_FREEZE {
            return Err(RequestError::InvalidClientRequest {
                identifier: request.identifier.clone(),
                req_id: request.req_id,
                reason: format!(
                    "Unexpected txn type {}, expected {LEDGERS_FREEZE}",
                    request.txn_type()
                ),
            });
        }
        Ok(())
    }

    fn validate_txn_type(&self, txn: &Txn) -> Result<(), RequestError> {
        if txn.txn_type() != &LEDGERS_FREEZE {
            return Err(RequestError::TxnIntegrity(format!(
                "Unexpected txn type {}, expected {LEDGERS_FREEZE}",
                txn.txn_type()
            )));
        }
        Ok(())
    }
}

impl<S: VersionedState, V: WriteRequestValidator> WriteRequestHandler for LedgerFreezeHandler<S, V> {
    fn txn_type(&self) -> &TxnType {
        &HANDLED_TXN_TYPE
    }

    fn ledger_id(&self) -> LedgerId {
        CONFIG_LEDGER_ID
    }

    fn static_validation(&self, request: &Request) -> Result<(), RequestError> {
        self.validate_request_type(request)
    }

    fn dynamic_validation(
        &self,
        request: &Request,
        _req_pp_time: Option<u64>,
    ) -> Result<(), RequestError> {
        self.validate_request_type(request)?;

        // Presence alone decides; the stored contents are never decoded here.
        let record_exists = self
            .state
            .get(frozen_ledgers_state_key(), false)?
            .is_some();
        let action = if record_exists {
            AuthAction::edit_any(LEDGERS_FREEZE)
        } else {
            AuthAction::add_any(LEDGERS_FREEZE)
        };
        debug!(
            identifier = %request.identifier,
            req_id = request.req_id,
            action = %action,
            "Checking ledger freeze authorization"
        );

        self.write_req_validator
            .validate(request, std::slice::from_ref(&action))
            .map_err(|e| {
                warn!(
                    identifier = %request.identifier,
                    req_id = request.req_id,
                    error = %e,
                    "Ledger freeze rejected by authorization rules"
                );
                RequestError::UnauthorizedClientRequest {
                    identifier: request.identifier.clone(),
                    req_id: request.req_id,
                    reason: format!("{}: {e}", e.action),
                }
            })
    }

    fn update_state(
        &self,
        txn: Txn,
        _prev_result: Option<&Txn>,
        _request: Option<&Request>,
        _is_committed: bool,
    ) -> Result<Txn, RequestError> {
        self.validate_txn_type(&txn)?;

        let seq_no = txn.seq_no().ok_or_else(|| {
            RequestError::TxnIntegrity("ledger freeze txn has no seq_no".to_string())
        })?;
        let txn_time = txn.txn_time().ok_or_else(|| {
            RequestError::TxnIntegrity("ledger freeze txn has no txn_time".to_string())
        })?;
        let payload = FreezeLedgersPayload::from_data(txn.payload_data()).map_err(|e| {
            RequestError::TxnIntegrity(format!("malformed ledger freeze payload: {e}"))
        })?;

        let frozen_ledgers = payload.frozen_ledgers_list();
        let key = frozen_ledgers_state_key();
        self.state
            .set(key, encode_state_value(key, &frozen_ledgers, seq_no, txn_time)?)?;

        info!(
            frozen_ledgers = ?frozen_ledgers,
            seq_no,
            txn_time,
            "Frozen ledgers updated"
        );
        Ok(txn)
    }
}

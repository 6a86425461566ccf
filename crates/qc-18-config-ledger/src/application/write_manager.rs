//! Write Request Manager
//!
//! Registry of handlers keyed by transaction type. Drives the three stages of
//! every write in order and owns batch commit/revert of the configuration
//! ledger state.

use super::ledgers_freeze::read_frozen_ledgers;
use crate::config::ConfigLedgerConfig;
use crate::domain::entities::{FreezeLedgersPayload, FrozenLedgersRecord};
use crate::domain::errors::RequestError;
use crate::ports::{ReadRequestHandler, ReadResult, VersionedState, WriteRequestHandler};
use shared_types::{Request, Txn, TxnType, LEDGERS_FREEZE};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Request pipeline over the registered handlers.
///
/// 1. `static_validation` - operation schema, then every handler for the type,
///    no state access
/// 2. `dynamic_validation` - frozen-ledger guard, then every handler
/// 3. `update_state` / `apply_request` - handlers chained in registration order
pub struct WriteRequestManager<S: VersionedState> {
    config: ConfigLedgerConfig,
    config_state: Arc<S>,
    write_handlers: HashMap<TxnType, Vec<Arc<dyn WriteRequestHandler>>>,
    read_handlers: HashMap<TxnType, Arc<dyn ReadRequestHandler>>,
}

impl<S: VersionedState> WriteRequestManager<S> {
    pub fn new(config: ConfigLedgerConfig, config_state: Arc<S>) -> Self {
        Self {
            config,
            config_state,
            write_handlers: HashMap::new(),
            read_handlers: HashMap::new(),
        }
    }

    /// Register a write handler. Several handlers per type run in registration order.
    pub fn register_write_handler(&mut self, handler: Arc<dyn WriteRequestHandler>) {
        self.write_handlers
            .entry(handler.txn_type().clone())
            .or_default()
            .push(handler);
    }

    pub fn register_read_handler(&mut self, handler: Arc<dyn ReadRequestHandler>) {
        self.read_handlers
            .insert(handler.txn_type().clone(), handler);
    }

    pub fn is_write_type(&self, txn_type: &TxnType) -> bool {
        self.write_handlers.contains_key(txn_type)
    }

    pub fn is_read_type(&self, txn_type: &TxnType) -> bool {
        self.read_handlers.contains_key(txn_type)
    }

    fn write_handlers_for(
        &self,
        txn_type: &TxnType,
    ) -> Result<&[Arc<dyn WriteRequestHandler>], RequestError> {
        self.write_handlers
            .get(txn_type)
            .map(Vec::as_slice)
            .ok_or_else(|| RequestError::UnknownTxnType(txn_type.clone()))
    }

    pub fn static_validation(&self, request: &Request) -> Result<(), RequestError> {
        let handlers = self.write_handlers_for(request.txn_type())?;
        validate_operation_schema(request)?;
        for handler in handlers {
            handler.static_validation(request)?;
        }
        Ok(())
    }

    pub fn dynamic_validation(
        &self,
        request: &Request,
        req_pp_time: Option<u64>,
    ) -> Result<(), RequestError> {
        let handlers = self.write_handlers_for(request.txn_type())?;
        self.check_not_frozen(request, handlers)?;
        for handler in handlers {
            handler.dynamic_validation(request, req_pp_time)?;
        }
        Ok(())
    }

    /// Reject writes to a frozen ledger. Ledger freezes themselves always pass
    /// so that ledgers can be unfrozen.
    fn check_not_frozen(
        &self,
        request: &Request,
        handlers: &[Arc<dyn WriteRequestHandler>],
    ) -> Result<(), RequestError> {
        if !self.config.enforce_frozen_ledgers || request.txn_type() == &LEDGERS_FREEZE {
            return Ok(());
        }
        let Some(frozen) = read_frozen_ledgers(self.config_state.as_ref(), false)? else {
            return Ok(());
        };
        for handler in handlers {
            let ledger_id = handler.ledger_id();
            if frozen.is_frozen(ledger_id) {
                warn!(
                    ledger_id,
                    identifier = %request.identifier,
                    req_id = request.req_id,
                    "Rejecting write to frozen ledger"
                );
                return Err(RequestError::LedgerFrozen { ledger_id });
            }
        }
        Ok(())
    }

    /// Apply a sequenced transaction through every handler for its type.
    pub fn update_state(
        &self,
        txn: Txn,
        request: Option<&Request>,
        is_committed: bool,
    ) -> Result<Txn, RequestError> {
        let mut result: Option<Txn> = None;
        for handler in self.write_handlers_for(txn.txn_type())? {
            let updated = handler.update_state(txn.clone(), result.as_ref(), request, is_committed)?;
            result = Some(updated);
        }
        result.ok_or_else(|| RequestError::UnknownTxnType(txn.txn_type().clone()))
    }

    /// Turn an ordered request into a transaction and apply it.
    pub fn apply_request(
        &self,
        request: &Request,
        seq_no: u64,
        txn_time: u64,
    ) -> Result<Txn, RequestError> {
        let txn = Txn::from_request(request).with_seq_no_and_time(seq_no, txn_time);
        debug!(
            txn_type = %txn.txn_type(),
            seq_no,
            txn_time,
            "Applying ordered request"
        );
        self.update_state(txn, Some(request), false)
    }

    pub fn get_result(&self, request: &Request) -> Result<ReadResult, RequestError> {
        let handler = self
            .read_handlers
            .get(request.txn_type())
            .ok_or_else(|| RequestError::UnknownTxnType(request.txn_type().clone()))?;
        handler.get_result(request)
    }

    /// Current frozen-ledgers record, including uncommitted writes.
    pub fn frozen_ledgers(&self) -> Result<Option<FrozenLedgersRecord>, RequestError> {
        Ok(read_frozen_ledgers(self.config_state.as_ref(), false)?)
    }

    pub fn commit_batch(&self) -> Result<(), RequestError> {
        self.config_state.commit()?;
        debug!("Committed config ledger batch");
        Ok(())
    }

    pub fn revert_batch(&self) -> Result<(), RequestError> {
        self.config_state.revert_to_committed()?;
        debug!("Reverted config ledger batch");
        Ok(())
    }
}

/// Shape check of the client operation, so malformed payloads are rejected
/// before ordering instead of failing at apply.
fn validate_operation_schema(request: &Request) -> Result<(), RequestError> {
    if request.txn_type() == &LEDGERS_FREEZE {
        FreezeLedgersPayload::from_data(&request.operation.fields).map_err(|e| {
            RequestError::InvalidClientRequest {
                identifier: request.identifier.clone(),
                req_id: request.req_id,
                reason: format!("invalid ledger freeze operation: {e}"),
            }
        })?;
    }
    Ok(())
}

//! Inbound Ports (Driving Ports / API)
//!
//! The contracts the request pipeline drives. One implementation per
//! transaction type.

use crate::domain::errors::RequestError;
use serde::{Deserialize, Serialize};
use shared_types::{Did, LedgerId, Request, Txn, TxnType};

/// Handler for one write transaction type.
///
/// The pipeline calls the three stages in a fixed order:
/// 1. `static_validation` on receipt, no state access
/// 2. `dynamic_validation` during ordering, reads state only
/// 3. `update_state` once the transaction is ordered
pub trait WriteRequestHandler: Send + Sync {
    /// Transaction type this handler is registered for.
    fn txn_type(&self) -> &TxnType;

    /// Ledger the transaction is written to.
    fn ledger_id(&self) -> LedgerId;

    fn static_validation(&self, request: &Request) -> Result<(), RequestError>;

    /// `req_pp_time` is the proposed commit time of the batch, when known.
    fn dynamic_validation(
        &self,
        request: &Request,
        req_pp_time: Option<u64>,
    ) -> Result<(), RequestError>;

    /// Apply a sequenced transaction to state and return it for chaining.
    ///
    /// `prev_result` is the output of the previous handler registered for the
    /// same type, if any.
    fn update_state(
        &self,
        txn: Txn,
        prev_result: Option<&Txn>,
        request: Option<&Request>,
        is_committed: bool,
    ) -> Result<Txn, RequestError>;
}

/// Reply to a read request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadResult {
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub identifier: Did,
    pub req_id: u64,
    /// The stored value, `None` when nothing is stored.
    pub data: Option<serde_json::Value>,
    pub seq_no: Option<u64>,
    pub txn_time: Option<u64>,
}

/// Handler for one read request type.
pub trait ReadRequestHandler: Send + Sync {
    fn txn_type(&self) -> &TxnType;

    fn get_result(&self, request: &Request) -> Result<ReadResult, RequestError>;
}

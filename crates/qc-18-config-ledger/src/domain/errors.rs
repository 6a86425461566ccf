//! Error types for configuration-ledger request handling.

use shared_types::{Did, LedgerId, StateError, TxnType};
use thiserror::Error;

/// All errors a write or read handler can raise.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Malformed request or wrong handler for its type.
    #[error("Invalid request {identifier}:{req_id}: {reason}")]
    InvalidClientRequest {
        identifier: Did,
        req_id: u64,
        reason: String,
    },

    /// The policy evaluator rejected the request.
    #[error("Unauthorized request {identifier}:{req_id}: {reason}")]
    UnauthorizedClientRequest {
        identifier: Did,
        req_id: u64,
        reason: String,
    },

    /// The ledger targeted by the request is frozen.
    #[error("Ledger {ledger_id} is frozen")]
    LedgerFrozen { ledger_id: LedgerId },

    /// No handler is registered for the transaction type.
    #[error("No handler registered for txn type {0}")]
    UnknownTxnType(TxnType),

    /// A transaction reached state application in a shape validation should
    /// have rejected. Never recoverable for that transaction.
    #[error("Transaction integrity violation: {0}")]
    TxnIntegrity(String),

    /// State store failure.
    #[error("State error: {0}")]
    State(#[from] StateError),
}

impl RequestError {
    /// Whether this error is a rejection to report back to the client, as
    /// opposed to a processing fault of the node.
    pub fn is_client_rejection(&self) -> bool {
        matches!(
            self,
            RequestError::InvalidClientRequest { .. }
                | RequestError::UnauthorizedClientRequest { .. }
                | RequestError::LedgerFrozen { .. }
                | RequestError::UnknownTxnType(_)
        )
    }
}

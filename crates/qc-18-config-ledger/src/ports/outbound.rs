//! Outbound Ports (Driven Ports / SPI)

use crate::domain::auth::{AuthAction, AuthError};
use shared_types::{Request, StateError};

/// Versioned key-value state of one ledger.
///
/// Writes go to an uncommitted head that is promoted by `commit` or dropped by
/// `revert_to_committed`, so a batch is applied atomically.
pub trait VersionedState: Send + Sync {
    /// Read from the uncommitted head, or from committed state when
    /// `is_committed` is set.
    fn get(&self, key: &[u8], is_committed: bool) -> Result<Option<Vec<u8>>, StateError>;

    /// Write to the uncommitted head.
    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StateError>;

    /// Promote all uncommitted writes.
    fn commit(&self) -> Result<(), StateError>;

    /// Drop all uncommitted writes.
    fn revert_to_committed(&self) -> Result<(), StateError>;
}

/// Authorization policy evaluator.
///
/// Passes if the request is allowed to perform every listed action.
pub trait WriteRequestValidator: Send + Sync {
    fn validate(&self, request: &Request, actions: &[AuthAction]) -> Result<(), AuthError>;
}

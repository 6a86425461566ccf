//! # Shared Types Crate
//!
//! Request, transaction and identity types shared by every ledger handler,
//! plus the error type of the versioned state store.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Wire shapes of `Request` and `Txn` are defined here.
//! - **Ordering Metadata Is External**: `seq_no` and `txn_time` are assigned by the
//!   commit pipeline and are optional until then.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

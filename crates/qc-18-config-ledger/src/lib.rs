//! # QC-18: Configuration Ledger Subsystem
//!
//! Governance transactions of the configuration ledger. Currently handles
//! ledger freezing: who may freeze ledgers, and the single frozen-ledgers record
//! every other ledger's writes are checked against.
//!
//! ## Architecture
//!
//! - **Domain**: Frozen-ledgers record, state key, state value codec, authorization actions
//! - **Ports**: Inbound (`WriteRequestHandler`, `ReadRequestHandler`) and
//!   Outbound (`VersionedState`, `WriteRequestValidator`)
//! - **Application**: `LedgerFreezeHandler`, `GetFrozenLedgersHandler`, `WriteRequestManager`
//! - **Adapters**: `InMemoryState`, rule-based `AuthRuleValidator`
//!
//! ## Request Flow
//!
//! ```text
//! Request ──→ static_validation ──→ dynamic_validation ──→ [ordering] ──→ update_state
//!                (type check)       (read record, Add/Edit     (seq_no,     (overwrite
//!                                    authorization)            txn_time)    record)
//! ```
//!
//! Handlers are called strictly sequentially by the ordering pipeline.
//! Validation only reads state; `update_state` is the only writer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{AuthRuleValidator, InMemoryState};
pub use application::{
    read_frozen_ledgers, GetFrozenLedgersHandler, LedgerFreezeHandler, WriteRequestManager,
};
pub use config::ConfigLedgerConfig;
pub use domain::*;
pub use ports::{
    ReadRequestHandler, ReadResult, VersionedState, WriteRequestHandler, WriteRequestValidator,
};

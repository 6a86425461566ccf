//! Application layer: request handlers and the pipeline driving them.

pub mod get_frozen_ledgers;
pub mod ledgers_freeze;
pub mod write_manager;

pub use get_frozen_ledgers::GetFrozenLedgersHandler;
pub use ledgers_freeze::{read_frozen_ledgers, LedgerFreezeHandler};
pub use write_manager::WriteRequestManager;

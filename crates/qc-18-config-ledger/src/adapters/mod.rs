//! Adapters for the Configuration Ledger
//!
//! Concrete implementations of the outbound ports.

pub mod auth_rules;
pub mod memory_state;

pub use auth_rules::AuthRuleValidator;
pub use memory_state::InMemoryState;

//! Ports module for the Configuration Ledger
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::{ReadRequestHandler, ReadResult, WriteRequestHandler};
pub use outbound::{VersionedState, WriteRequestValidator};

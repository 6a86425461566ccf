pub mod auth;
pub mod entities;
pub mod errors;
pub mod state_keys;
pub mod state_value;

pub use auth::*;
pub use entities::*;
pub use errors::*;
pub use state_keys::*;
pub use state_value::*;

//! State keys of the configuration ledger.

macro_rules! frozen_ledgers_marker {
    () => {
        "4"
    };
}

macro_rules! frozen_ledgers_suffix {
    () => {
        "FROZEN_LEDGERS"
    };
}

/// Marker prefixing the frozen-ledgers slot.
pub const MARKER_FROZEN_LEDGERS: &str = frozen_ledgers_marker!();

/// Suffix of the frozen-ledgers slot.
pub const FROZEN_LEDGERS_SUFFIX: &str = frozen_ledgers_suffix!();

const FROZEN_LEDGERS_KEY: &str = concat!(frozen_ledgers_marker!(), ":", frozen_ledgers_suffix!());

/// The single key holding the frozen-ledgers record.
///
/// Freezing is one global list, so there is exactly one key for it.
pub fn frozen_ledgers_state_key() -> &'static [u8] {
    FROZEN_LEDGERS_KEY.as_bytes()
}

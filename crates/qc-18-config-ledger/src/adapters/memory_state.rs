use crate::ports::VersionedState;
use parking_lot::RwLock;
use shared_types::StateError;
use std::collections::HashMap;

/// In-memory implementation of VersionedState
///
/// Committed values live in one map; uncommitted writes are an overlay on top
/// of it until `commit` or `revert_to_committed`.
#[derive(Default)]
pub struct InMemoryState {
    committed: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    uncommitted: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any write is waiting for `commit`.
    pub fn has_uncommitted(&self) -> bool {
        !self.uncommitted.read().is_empty()
    }
}

impl VersionedState for InMemoryState {
    fn get(&self, key: &[u8], is_committed: bool) -> Result<Option<Vec<u8>>, StateError> {
        if !is_committed {
            if let Some(value) = self.uncommitted.read().get(key) {
                return Ok(Some(value.clone()));
            }
        }
        Ok(self.committed.read().get(key).cloned())
    }

    fn set(&self, key: &[u8], value: Vec<u8>) -> Result<(), StateError> {
        self.uncommitted.write().insert(key.to_vec(), value);
        Ok(())
    }

    fn commit(&self) -> Result<(), StateError> {
        let mut uncommitted = self.uncommitted.write();
        let mut committed = self.committed.write();
        committed.extend(uncommitted.drain());
        Ok(())
    }

    fn revert_to_committed(&self) -> Result<(), StateError> {
        self.uncommitted.write().clear();
        Ok(())
    }
}

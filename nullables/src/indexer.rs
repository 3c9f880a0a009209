//! Nullable indexer: configured referendum aggregates.

use govtally_chain::{ChainError, IndexerReferendum, IndexerSource};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct NullIndexer {
    referenda: Mutex<HashMap<u32, IndexerReferendum>>,
    unreachable: Mutex<bool>,
    requested: Mutex<Vec<u32>>,
}

impl NullIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_referendum(&self, index: u32, referendum: IndexerReferendum) {
        self.referenda.lock().unwrap().insert(index, referendum);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// Indices requested so far.
    pub fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

impl IndexerSource for NullIndexer {
    async fn referendum(&self, index: u32) -> Result<Option<IndexerReferendum>, ChainError> {
        self.requested.lock().unwrap().push(index);
        if *self.unreachable.lock().unwrap() {
            return Err(ChainError::Unreachable("null indexer".into()));
        }
        Ok(self.referenda.lock().unwrap().get(&index).cloned())
    }
}

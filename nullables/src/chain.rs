//! Nullable chain storage: configured referenda, block hashes and issuance.

use govtally_chain::{ChainError, ChainSource, Issuance, ReferendumInfo};
use govtally_types::IssuanceModule;
use std::collections::HashMap;
use std::sync::Mutex;

/// A query received by [`NullChain`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainQuery {
    ReferendumInfo { index: u32, at: Option<String> },
    BlockHash(u64),
    Issuance(IssuanceModule),
}

/// In-memory chain storage. Thread-safe so it can back an aggregator on
/// tokio's multi-threaded runtime.
///
/// Referenda are keyed by index and block hash; `None` is the head state.
/// A referendum with no configured entry reads as empty storage.
#[derive(Default)]
pub struct NullChain {
    referenda: Mutex<HashMap<(u32, Option<String>), ReferendumInfo>>,
    block_hashes: Mutex<HashMap<u64, String>>,
    issuance: Mutex<HashMap<IssuanceModule, Issuance>>,
    unreachable: Mutex<bool>,
    queries: Mutex<Vec<ChainQuery>>,
}

impl NullChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the head state of referendum `index`.
    pub fn set_referendum(&self, index: u32, info: ReferendumInfo) {
        self.referenda.lock().unwrap().insert((index, None), info);
    }

    /// Set the state of referendum `index` as seen at block `hash`.
    pub fn set_referendum_at(&self, index: u32, hash: &str, info: ReferendumInfo) {
        self.referenda
            .lock()
            .unwrap()
            .insert((index, Some(hash.to_string())), info);
    }

    pub fn set_block_hash(&self, number: u64, hash: &str) {
        self.block_hashes
            .lock()
            .unwrap()
            .insert(number, hash.to_string());
    }

    pub fn set_issuance(&self, module: IssuanceModule, issuance: Issuance) {
        self.issuance.lock().unwrap().insert(module, issuance);
    }

    /// Make every subsequent query fail as if the node were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    /// All queries received so far (for assertions).
    pub fn queries(&self) -> Vec<ChainQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, query: ChainQuery) -> Result<(), ChainError> {
        self.queries.lock().unwrap().push(query);
        if *self.unreachable.lock().unwrap() {
            return Err(ChainError::Unreachable("null chain".into()));
        }
        Ok(())
    }
}

impl ChainSource for NullChain {
    async fn referendum_info(
        &self,
        index: u32,
        at: Option<&str>,
    ) -> Result<Option<ReferendumInfo>, ChainError> {
        let at = at.map(str::to_string);
        self.record(ChainQuery::ReferendumInfo {
            index,
            at: at.clone(),
        })?;
        Ok(self.referenda.lock().unwrap().get(&(index, at)).cloned())
    }

    async fn block_hash(&self, number: u64) -> Result<String, ChainError> {
        self.record(ChainQuery::BlockHash(number))?;
        self.block_hashes
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| ChainError::InvalidResponse(format!("no block {number}")))
    }

    async fn issuance(&self, module: IssuanceModule) -> Result<Issuance, ChainError> {
        self.record(ChainQuery::Issuance(module))?;
        self.issuance
            .lock()
            .unwrap()
            .get(&module)
            .cloned()
            .ok_or_else(|| ChainError::InvalidResponse(format!("no {} issuance", module.pallet())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govtally_types::RawAmount;

    #[tokio::test]
    async fn test_head_and_historical_state_are_separate() {
        let chain = NullChain::new();
        chain.set_referendum(3, ReferendumInfo::default());

        assert!(chain.referendum_info(3, None).await.unwrap().is_some());
        assert!(chain.referendum_info(3, Some("0xab")).await.unwrap().is_none());
        assert_eq!(
            chain.queries(),
            vec![
                ChainQuery::ReferendumInfo { index: 3, at: None },
                ChainQuery::ReferendumInfo {
                    index: 3,
                    at: Some("0xab".into())
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_issuance_per_module() {
        let chain = NullChain::new();
        chain.set_issuance(
            IssuanceModule::OpenGovBalances,
            Issuance {
                total: RawAmount::Int(10),
                inactive: RawAmount::Int(1),
            },
        );
        assert!(chain.issuance(IssuanceModule::OpenGovBalances).await.is_ok());
        assert!(chain.issuance(IssuanceModule::Balances).await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable() {
        let chain = NullChain::new();
        chain.set_block_hash(9, "0x09");
        chain.set_unreachable(true);
        assert!(matches!(
            chain.block_hash(9).await,
            Err(ChainError::Unreachable(_))
        ));
        chain.set_unreachable(false);
        assert_eq!(chain.block_hash(9).await.unwrap(), "0x09");
    }
}

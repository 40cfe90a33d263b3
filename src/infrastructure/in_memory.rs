use crate::domain::funds::{Amount, Balance};
use crate::domain::pool::{CampaignPool, PartyId, PoolId};
use crate::domain::ports::{PayoutLedger, PoolStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for pool state.
///
/// Uses `Arc<RwLock<BTreeMap<PoolId, CampaignPool>>>` to allow shared
/// concurrent access; the ordered map keeps `all()` in creation order for
/// free. Ideal for testing or single-run use where persistence is not
/// required.
#[derive(Default, Clone)]
pub struct InMemoryPoolStore {
    pools: Arc<RwLock<BTreeMap<PoolId, CampaignPool>>>,
}

impl InMemoryPoolStore {
    /// Creates a new, empty in-memory pool store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PoolStore for InMemoryPoolStore {
    async fn put(&self, id: PoolId, pool: CampaignPool) -> Result<()> {
        let mut pools = self.pools.write().await;
        pools.insert(id, pool);
        Ok(())
    }

    async fn get(&self, id: PoolId) -> Result<Option<CampaignPool>> {
        let pools = self.pools.read().await;
        Ok(pools.get(&id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        let pools = self.pools.read().await;
        Ok(pools.len() as u64)
    }

    async fn all(&self) -> Result<Vec<(PoolId, CampaignPool)>> {
        let pools = self.pools.read().await;
        Ok(pools.iter().map(|(id, pool)| (*id, pool.clone())).collect())
    }
}

/// A thread-safe in-memory payout ledger.
///
/// Accumulates released funds per recipient identity.
#[derive(Default, Clone)]
pub struct InMemoryPayoutLedger {
    balances: Arc<RwLock<BTreeMap<PartyId, Balance>>>,
}

impl InMemoryPayoutLedger {
    /// Creates a new, empty payout ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayoutLedger for InMemoryPayoutLedger {
    async fn credit(&self, recipient: PartyId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.write().await;
        *balances.entry(recipient).or_insert(Balance::ZERO) += amount.into();
        Ok(())
    }

    async fn balance(&self, party: &PartyId) -> Result<Balance> {
        let balances = self.balances.read().await;
        Ok(balances.get(party).copied().unwrap_or(Balance::ZERO))
    }

    async fn all(&self) -> Result<Vec<(PartyId, Balance)>> {
        let balances = self.balances.read().await;
        Ok(balances
            .iter()
            .map(|(party, balance)| (party.clone(), *balance))
            .collect())
    }
}

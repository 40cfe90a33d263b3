use crate::domain::funds::Amount;
use crate::domain::pool::{CampaignPool, PartyId, PoolId};
use crate::domain::ports::{PoolStore, PoolStoreBox};
use crate::error::{PoolError, Result};
use tracing::info;

/// Deploys pools and owns the append-only registry of everything deployed.
///
/// Creation is unrestricted: whoever asks becomes the new pool's manager.
/// Ids are dense and allocated in creation order, so the registry never
/// needs separate bookkeeping.
pub struct PoolFactory {
    pools: PoolStoreBox,
}

impl PoolFactory {
    pub fn new(pools: PoolStoreBox) -> Self {
        Self { pools }
    }

    /// Creates a new pool managed by `manager` and returns its id.
    pub async fn create_pool(&self, manager: PartyId, minimum: Amount) -> Result<PoolId> {
        let id = self.pools.count().await?;
        let pool = CampaignPool::new(manager.clone(), minimum);
        self.pools.put(id, pool).await?;

        info!(pool = id, manager = %manager, minimum = %minimum, "pool deployed");
        Ok(id)
    }

    /// All deployed pool ids, in creation order.
    pub async fn deployed_pools(&self) -> Result<Vec<PoolId>> {
        let count = self.pools.count().await?;
        Ok((0..count).collect())
    }

    /// Loads a pool's state or fails with `PoolNotFound`.
    pub async fn load(&self, id: PoolId) -> Result<CampaignPool> {
        self.pools
            .get(id)
            .await?
            .ok_or(PoolError::PoolNotFound(id))
    }

    /// Persists a pool's state under its id.
    pub async fn save(&self, id: PoolId, pool: CampaignPool) -> Result<()> {
        self.pools.put(id, pool).await
    }

    /// Snapshot of every deployed pool, in creation order.
    pub async fn all(&self) -> Result<Vec<(PoolId, CampaignPool)>> {
        self.pools.all().await
    }
}

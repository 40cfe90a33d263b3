use super::funds::{Amount, Balance};
use super::pool::{CampaignPool, PartyId, PoolId};
use crate::error::Result;
use async_trait::async_trait;

/// Durable storage for pool state, scoped per pool id.
///
/// Ids are dense and allocated by the factory in creation order, so the
/// deployed registry is exactly `0..count()`.
#[async_trait]
pub trait PoolStore: Send + Sync {
    async fn put(&self, id: PoolId, pool: CampaignPool) -> Result<()>;
    async fn get(&self, id: PoolId) -> Result<Option<CampaignPool>>;
    async fn count(&self) -> Result<u64>;
    async fn all(&self) -> Result<Vec<(PoolId, CampaignPool)>>;
}

/// Executes the value-transfer instructions the pools emit.
///
/// Stands in for the runtime's payment rail: credits accumulate per
/// recipient identity.
#[async_trait]
pub trait PayoutLedger: Send + Sync {
    async fn credit(&self, recipient: PartyId, amount: Amount) -> Result<()>;
    async fn balance(&self, party: &PartyId) -> Result<Balance>;
    async fn all(&self) -> Result<Vec<(PartyId, Balance)>>;
}

pub type PoolStoreBox = Box<dyn PoolStore>;
pub type PayoutLedgerBox = Box<dyn PayoutLedger>;

pub type PoolStoreFactory = Box<dyn Fn() -> PoolStoreBox + Send>;
pub type PayoutLedgerFactory = Box<dyn Fn() -> PayoutLedgerBox + Send>;

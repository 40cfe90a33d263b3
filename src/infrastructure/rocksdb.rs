use crate::domain::funds::{Amount, Balance};
use crate::domain::pool::{CampaignPool, PartyId, PoolId};
use crate::domain::ports::{PayoutLedger, PoolStore};
use crate::error::{PoolError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing pool state.
pub const CF_POOLS: &str = "pools";
/// Column Family for storing released payout balances.
pub const CF_PAYOUTS: &str = "payouts";

/// A persistent store implementation using RocksDB.
///
/// Handles storage for both `CampaignPool` state and payout balances using
/// separate Column Families. Pool ids are stored as big-endian keys so
/// iteration order matches creation order.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("pools" and "payouts")
    /// exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_pools = ColumnFamilyDescriptor::new(CF_POOLS, Options::default());
        let cf_payouts = ColumnFamilyDescriptor::new(CF_PAYOUTS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_pools, cf_payouts])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PoolError::Internal(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| {
        PoolError::Internal(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Serialization error: {e}"),
        )))
    })
}

fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        PoolError::Internal(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Deserialization error: {e}"),
        )))
    })
}

#[async_trait]
impl PoolStore for RocksDBStore {
    async fn put(&self, id: PoolId, pool: CampaignPool) -> Result<()> {
        let cf = self.cf(CF_POOLS)?;
        self.db.put_cf(cf, id.to_be_bytes(), to_json(&pool)?)?;
        Ok(())
    }

    async fn get(&self, id: PoolId) -> Result<Option<CampaignPool>> {
        let cf = self.cf(CF_POOLS)?;
        match self.db.get_cf(cf, id.to_be_bytes())? {
            Some(bytes) => Ok(Some(from_json(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<u64> {
        let cf = self.cf(CF_POOLS)?;
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            item.map_err(|e| PoolError::Internal(Box::new(e)))?;
            count += 1;
        }
        Ok(count)
    }

    async fn all(&self) -> Result<Vec<(PoolId, CampaignPool)>> {
        let cf = self.cf(CF_POOLS)?;
        let mut pools = Vec::new();

        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (key, value) = item.map_err(|e| PoolError::Internal(Box::new(e)))?;
            let id = PoolId::from_be_bytes(key.as_ref().try_into().map_err(|_| {
                PoolError::Internal(Box::new(std::io::Error::other("malformed pool key")))
            })?);
            pools.push((id, from_json(&value)?));
        }

        Ok(pools)
    }
}

#[async_trait]
impl PayoutLedger for RocksDBStore {
    async fn credit(&self, recipient: PartyId, amount: Amount) -> Result<()> {
        let cf = self.cf(CF_PAYOUTS)?;
        let key = recipient.as_str().as_bytes().to_vec();

        let mut balance: Balance = match self.db.get_cf(cf, &key)? {
            Some(bytes) => from_json(&bytes)?,
            None => Balance::ZERO,
        };
        balance += amount.into();

        self.db.put_cf(cf, key, to_json(&balance)?)?;
        Ok(())
    }

    async fn balance(&self, party: &PartyId) -> Result<Balance> {
        let cf = self.cf(CF_PAYOUTS)?;
        match self.db.get_cf(cf, party.as_str().as_bytes())? {
            Some(bytes) => from_json(&bytes),
            None => Ok(Balance::ZERO),
        }
    }

    async fn all(&self) -> Result<Vec<(PartyId, Balance)>> {
        let cf = self.cf(CF_PAYOUTS)?;
        let mut balances = Vec::new();

        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (key, value) = item.map_err(|e| PoolError::Internal(Box::new(e)))?;
            let party = PartyId::new(String::from_utf8_lossy(&key).into_owned());
            balances.push((party, from_json(&value)?));
        }

        Ok(balances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn pool(manager: &str) -> CampaignPool {
        CampaignPool::new(PartyId::from(manager), Amount::new(dec!(100)).unwrap())
    }

    #[tokio::test]
    async fn test_rocksdb_open_cf() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).expect("Failed to open RocksDB");

        assert!(store.db.cf_handle(CF_POOLS).is_some());
        assert!(store.db.cf_handle(CF_PAYOUTS).is_some());
    }

    #[tokio::test]
    async fn test_rocksdb_pool_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        let mut deployed = pool("mgr");
        deployed
            .contribute(PartyId::from("alice"), Amount::new(dec!(500)).unwrap())
            .unwrap();

        store.put(0, deployed.clone()).await.unwrap();

        let retrieved = store.get(0).await.unwrap().unwrap();
        assert_eq!(retrieved, deployed);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rocksdb_all_preserves_creation_order() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();

        // More than 256 pools so ordering would break with little-endian keys
        for id in 0..300u64 {
            store.put(id, pool(&format!("mgr{id}"))).await.unwrap();
        }

        let all = PoolStore::all(&store).await.unwrap();
        let ids: Vec<PoolId> = all.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, (0..300).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_rocksdb_payout_ledger() {
        let dir = tempdir().unwrap();
        let store = RocksDBStore::open(dir.path()).unwrap();
        let vendor = PartyId::from("vendor");

        store
            .credit(vendor.clone(), Amount::new(dec!(10)).unwrap())
            .await
            .unwrap();
        store
            .credit(vendor.clone(), Amount::new(dec!(5)).unwrap())
            .await
            .unwrap();

        assert_eq!(
            store.balance(&vendor).await.unwrap(),
            Balance::new(dec!(15))
        );
        assert_eq!(
            store.balance(&PartyId::from("nobody")).await.unwrap(),
            Balance::ZERO
        );
    }
}

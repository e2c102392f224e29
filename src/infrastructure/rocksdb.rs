use crate::domain::ports::PersistenceAdapter;
use crate::error::{Result, WalletError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Column Family holding the wallet slots.
pub const CF_WALLET: &str = "wallet";

/// A persistent slot store backed by RocksDB.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `wallet` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_wallet = ColumnFamilyDescriptor::new(CF_WALLET, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_wallet])?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl PersistenceAdapter for RocksDbStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let cf = self
            .db
            .cf_handle(CF_WALLET)
            .ok_or_else(|| WalletError::Storage("wallet column family not found".to_string()))?;

        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                WalletError::Storage(format!("slot '{}' is not valid UTF-8: {}", key, e))
            }),
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, value: String) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_WALLET)
            .ok_or_else(|| WalletError::Storage("wallet column family not found".to_string()))?;

        self.db.put_cf(&cf, key.as_bytes(), value.as_bytes())?;
        debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }
}
